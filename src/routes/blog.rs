use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::blog::requests::{
    CreatePostRequest, PostListParams, PublicPostListParams, UpdatePostRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BlogService;
use crate::utils::SafeIDI64;

// Lazily initialised global BlogService
static BLOG_SERVICE: Lazy<BlogService> = Lazy::new(BlogService::new_lazy);

// Editorial
pub async fn list_posts(
    request: HttpRequest,
    query: web::Query<PostListParams>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.list_posts(query.into_inner(), &request).await
}

pub async fn create_post(
    request: HttpRequest,
    body: web::Json<CreatePostRequest>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.create_post(body.into_inner(), &request).await
}

pub async fn get_post(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.get_post(id.0, &request).await
}

pub async fn update_post(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePostRequest>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE
        .update_post(id.0, body.into_inner(), &request)
        .await
}

pub async fn publish_post(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.publish_post(id.0, &request).await
}

pub async fn archive_post(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.archive_post(id.0, &request).await
}

pub async fn delete_post(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.delete_post(id.0, &request).await
}

// Public
pub async fn list_public_posts(
    request: HttpRequest,
    query: web::Query<PublicPostListParams>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE
        .list_public_posts(query.into_inner(), &request)
        .await
}

pub async fn get_public_post(
    request: HttpRequest,
    slug: web::Path<String>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.get_public_post(&slug, &request).await
}

pub async fn news_index(
    request: HttpRequest,
    query: web::Query<PublicPostListParams>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.news_index(query.into_inner(), &request).await
}

pub async fn news_post(request: HttpRequest, slug: web::Path<String>) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.news_post(&slug, &request).await
}

pub fn configure_blog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/posts")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            )
            .service(web::resource("/{id}/publish").route(web::post().to(publish_post)))
            .service(web::resource("/{id}/archive").route(web::post().to(archive_post))),
    )
    .service(
        web::scope("/api/v1/public/posts")
            .route("", web::get().to(list_public_posts))
            .route("/{slug}", web::get().to(get_public_post)),
    )
    .service(
        web::scope("/news")
            .wrap(middleware::Compress::default())
            .route("", web::get().to(news_index))
            .route("/{slug}", web::get().to(news_post)),
    );
}

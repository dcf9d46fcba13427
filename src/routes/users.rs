use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// Lazily initialised global UserService
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_users(
    request: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &request).await
}

pub async fn create_user(
    request: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(body.into_inner(), &request).await
}

pub async fn get_user(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(id.0, &request).await
}

pub async fn update_user(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_user(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(id.0, &request).await
}

/// Account management is admin only.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}

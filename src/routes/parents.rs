use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::parents::requests::{
    CreateParentRequest, LinkStudentRequest, ParentListParams, UpdateParentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ParentService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// Lazily initialised global ParentService
static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);

pub async fn list_parents(
    request: HttpRequest,
    query: web::Query<ParentListParams>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_parents(query.into_inner(), &request).await
}

pub async fn create_parent(
    request: HttpRequest,
    body: web::Json<CreateParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.create_parent(body.into_inner(), &request).await
}

pub async fn get_parent(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.get_parent(id.0, &request).await
}

pub async fn update_parent(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .update_parent(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_parent(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.delete_parent(id.0, &request).await
}

pub async fn my_children(request: HttpRequest) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.my_children(&request).await
}

pub async fn list_children(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_children(id.0, &request).await
}

pub async fn link_student(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<LinkStudentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .link_student(id.0, body.into_inner(), &request)
        .await
}

pub async fn unlink_student(
    request: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .unlink_student(id.0, student_id.0, &request)
        .await
}

pub fn configure_parent_routes(cfg: &mut web::ServiceConfig) {
    let admin_only = || middlewares::RequireRole::new_any(UserRole::admin_roles());
    let readers = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/parents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_parents).wrap(readers()))
                    .route(web::post().to(create_parent).wrap(admin_only())),
            )
            .service(
                web::resource("/me/students").route(
                    web::get()
                        .to(my_children)
                        .wrap(middlewares::RequireRole::new(&UserRole::Parent)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_parent).wrap(readers()))
                    .route(web::put().to(update_parent).wrap(admin_only()))
                    .route(web::delete().to(delete_parent).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}/students")
                    // a parent may list their own children; checked in the service
                    .route(web::get().to(list_children))
                    .route(web::post().to(link_student).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}/students/{student_id}")
                    .route(web::delete().to(unlink_student).wrap(admin_only())),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// Lazily initialised global TeacherService
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    request: HttpRequest,
    query: web::Query<TeacherListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_teachers(query.into_inner(), &request)
        .await
}

pub async fn create_teacher(
    request: HttpRequest,
    body: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(body.into_inner(), &request)
        .await
}

pub async fn get_teacher(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(id.0, &request).await
}

pub async fn update_teacher(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_teacher(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(id.0, &request).await
}

pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    let admin_only = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher).wrap(admin_only()))
                    .route(web::delete().to(delete_teacher).wrap(admin_only())),
            ),
    );
}

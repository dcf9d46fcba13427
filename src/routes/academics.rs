use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academics::requests::{
    ClassroomListParams, CreateClassroomRequest, CreateGradeLevelRequest, CreateSubjectRequest,
    CreateTermRequest, GradeLevelListParams, SubjectListParams, TermListParams,
    UpdateClassroomRequest, UpdateGradeLevelRequest, UpdateSubjectRequest, UpdateTermRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicsService;
use crate::utils::SafeIDI64;

// Lazily initialised global AcademicsService
static ACADEMICS_SERVICE: Lazy<AcademicsService> = Lazy::new(AcademicsService::new_lazy);

fn admin_only() -> middlewares::RequireRole {
    middlewares::RequireRole::new_any(UserRole::admin_roles())
}

// Grade levels
pub async fn list_grade_levels(
    request: HttpRequest,
    query: web::Query<GradeLevelListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .list_grade_levels(query.into_inner(), &request)
        .await
}

pub async fn create_grade_level(
    request: HttpRequest,
    body: web::Json<CreateGradeLevelRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_grade_level(body.into_inner(), &request)
        .await
}

pub async fn update_grade_level(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeLevelRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_grade_level(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_grade_level(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_grade_level(id.0, &request).await
}

// Classrooms
pub async fn list_classrooms(
    request: HttpRequest,
    query: web::Query<ClassroomListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .list_classrooms(query.into_inner(), &request)
        .await
}

pub async fn create_classroom(
    request: HttpRequest,
    body: web::Json<CreateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_classroom(body.into_inner(), &request)
        .await
}

pub async fn get_classroom(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_classroom(id.0, &request).await
}

pub async fn update_classroom(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_classroom(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_classroom(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_classroom(id.0, &request).await
}

// Terms
pub async fn list_terms(
    request: HttpRequest,
    query: web::Query<TermListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_terms(query.into_inner(), &request).await
}

pub async fn create_term(
    request: HttpRequest,
    body: web::Json<CreateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_term(body.into_inner(), &request).await
}

pub async fn get_current_term(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_current_term(&request).await
}

pub async fn get_term(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_term(id.0, &request).await
}

pub async fn update_term(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_term(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_term(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_term(id.0, &request).await
}

pub async fn set_current_term(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.set_current_term(id.0, &request).await
}

// Subjects
pub async fn list_subjects(
    request: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .list_subjects(query.into_inner(), &request)
        .await
}

pub async fn create_subject(
    request: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_subject(body.into_inner(), &request)
        .await
}

pub async fn get_subject(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_subject(id.0, &request).await
}

pub async fn update_subject(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_subject(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_subject(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_subject(id.0, &request).await
}

/// Any signed-in user reads the academic structure; only admins change it.
pub fn configure_academics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grade-levels")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grade_levels))
                    .route(web::post().to(create_grade_level).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_grade_level).wrap(admin_only()))
                    .route(web::delete().to(delete_grade_level).wrap(admin_only())),
            ),
    )
    .service(
        web::scope("/api/v1/classrooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classrooms))
                    .route(web::post().to(create_classroom).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_classroom))
                    .route(web::put().to(update_classroom).wrap(admin_only()))
                    .route(web::delete().to(delete_classroom).wrap(admin_only())),
            ),
    )
    .service(
        web::scope("/api/v1/terms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_terms))
                    .route(web::post().to(create_term).wrap(admin_only())),
            )
            // registered before /{id} so "current" is not read as an id
            .service(web::resource("/current").route(web::get().to(get_current_term)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_term))
                    .route(web::put().to(update_term).wrap(admin_only()))
                    .route(web::delete().to(delete_term).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}/current")
                    .route(web::post().to(set_current_term).wrap(admin_only())),
            ),
    )
    .service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_subject))
                    .route(web::put().to(update_subject).wrap(admin_only()))
                    .route(web::delete().to(delete_subject).wrap(admin_only())),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::models::grades::requests::{CreateGradeRequest, GradeListParams, UpdateGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::{AssessmentService, GradeService};
use crate::utils::SafeIDI64;

// Lazily initialised global AssessmentService and GradeService
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

fn graders() -> middlewares::RequireRole {
    middlewares::RequireRole::new_any(UserRole::teacher_roles())
}

pub async fn list_assessments(
    request: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(query.into_inner(), &request)
        .await
}

pub async fn create_assessment(
    request: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(body.into_inner(), &request)
        .await
}

pub async fn get_assessment(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(id.0, &request).await
}

pub async fn update_assessment(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_assessment(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assessment(id.0, &request).await
}

pub async fn list_grades(
    request: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &request).await
}

pub async fn create_grade(
    request: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(body.into_inner(), &request).await
}

pub async fn get_grade(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &request).await
}

pub async fn update_grade(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_grade(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(id.0, &request).await
}

/// Reads are open to every signed-in user; grade reads are narrowed to the
/// caller's own students in the service.
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assessments))
                    .route(web::post().to(create_assessment).wrap(graders())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assessment))
                    .route(web::put().to(update_assessment).wrap(graders()))
                    .route(web::delete().to(delete_assessment).wrap(graders())),
            ),
    )
    .service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    .route(web::post().to(create_grade).wrap(graders())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_grade))
                    .route(web::put().to(update_grade).wrap(graders()))
                    .route(web::delete().to(delete_grade).wrap(graders())),
            ),
    );
}

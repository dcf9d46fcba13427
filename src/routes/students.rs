use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{
    AttendanceSummaryParams, CreateStudentRequest, ReportCardParams, StudentListParams,
    UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// Lazily initialised global StudentService
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    request: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(query.into_inner(), &request)
        .await
}

pub async fn create_student(
    request: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(body.into_inner(), &request)
        .await
}

pub async fn get_student(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &request).await
}

pub async fn update_student(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_student(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &request).await
}

pub async fn report_card(
    request: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ReportCardParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .report_card(id.0, query.into_inner(), &request)
        .await
}

pub async fn attendance_summary(
    request: HttpRequest,
    id: SafeIDI64,
    query: web::Query<AttendanceSummaryParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .attendance_summary(id.0, query.into_inner(), &request)
        .await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_students)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::school_staff_roles(),
                            )),
                    )
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // students and parents are narrowed to their own records in the service
                    .route(web::get().to(get_student))
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(web::resource("/{id}/report").route(web::get().to(report_card)))
            .service(
                web::resource("/{id}/attendance-summary").route(web::get().to(attendance_summary)),
            ),
    );
}

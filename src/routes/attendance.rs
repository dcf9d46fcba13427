use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryQuery, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

// Lazily initialised global AttendanceService
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn mark_attendance(
    request: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(body.into_inner(), &request)
        .await
}

pub async fn list_attendance(
    request: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &request)
        .await
}

pub async fn attendance_summary(
    request: HttpRequest,
    query: web::Query<AttendanceSummaryQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.summary(query.into_inner(), &request).await
}

pub async fn update_attendance(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_attendance(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(id.0, &request).await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    let recorders = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireRole::new_any(
                UserRole::school_staff_roles(),
            ))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_attendance)))
            .service(
                web::resource("/mark").route(web::post().to(mark_attendance).wrap(recorders())),
            )
            .service(web::resource("/summary").route(web::get().to(attendance_summary)))
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_attendance).wrap(recorders()))
                    .route(web::delete().to(delete_attendance).wrap(recorders())),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::attendance::requests::AttendanceFilter;
use crate::models::students::requests::AttendanceSummaryParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::attendance::summary::summarize;
use crate::services::{accessible_student, bad_request, current_user, respond_on_err, stored};

pub async fn attendance_summary(
    service: &StudentService,
    id: i64,
    query: AttendanceSummaryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && to < from
    {
        return Ok(bad_request(
            ErrorCode::AttendanceInvalid,
            "'to' must not be before 'from'",
        ));
    }

    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);
    let student = respond_on_err!(accessible_student(storage.as_ref(), &user, id).await);

    let counts = respond_on_err!(stored(
        storage
            .count_attendance(AttendanceFilter {
                student_id: Some(student.id),
                from: query.from,
                to: query.to,
                ..Default::default()
            })
            .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summarize(counts, query.from, query.to),
        "Attendance summary retrieved",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{found, respond_on_err};

pub async fn update_student(
    service: &StudentService,
    id: i64,
    req: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(grade_level_id) = req.grade_level_id {
        respond_on_err!(found(
            storage.get_grade_level(grade_level_id).await,
            ErrorCode::NotFound,
            "Grade level not found",
        ));
    }
    if let Some(classroom_id) = req.classroom_id {
        respond_on_err!(found(
            storage.get_classroom(classroom_id).await,
            ErrorCode::NotFound,
            "Classroom not found",
        ));
    }

    let student = respond_on_err!(found(
        storage.update_student(id, req).await,
        ErrorCode::StudentNotFound,
        "Student not found",
    ));
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated")))
}

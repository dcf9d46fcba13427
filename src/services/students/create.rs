use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, error_response, found, profile_user, reject, respond_on_err, stored,
};
use crate::utils::validate::validate_required;

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("admission_number", &req.admission_number) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    req.admission_number = req.admission_number.trim().to_string();

    let storage = service.get_storage(request);

    let user = respond_on_err!(profile_user(storage.as_ref(), req.user_id, UserRole::Student).await);
    if respond_on_err!(stored(storage.get_student_by_user_id(user.id).await)).is_some() {
        return Ok(reject(
            actix_web::http::StatusCode::CONFLICT,
            ErrorCode::Conflict,
            "User already has a student profile",
        ));
    }

    respond_on_err!(found(
        storage.get_grade_level(req.grade_level_id).await,
        ErrorCode::NotFound,
        "Grade level not found",
    ));
    if let Some(classroom_id) = req.classroom_id {
        respond_on_err!(found(
            storage.get_classroom(classroom_id).await,
            ErrorCode::NotFound,
            "Classroom not found",
        ));
    }

    match storage.create_student(req).await {
        Ok(student) => {
            info!(
                "Enrolled {} with admission number {}",
                student.full_name(),
                student.admission_number
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student created")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

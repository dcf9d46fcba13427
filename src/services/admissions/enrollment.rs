use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdmissionService;
use crate::errors::SchoolError;
use crate::models::admissions::requests::EnrollApplicationRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, error_response, found, not_found, profile_user, reject, respond_on_err, stored,
};
use crate::utils::validate::validate_required;

impl AdmissionService {
    /// Enrolls an approved applicant as a student, attaching the profile to
    /// an existing student account.
    pub async fn enroll(
        &self,
        id: i64,
        mut req: EnrollApplicationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_required("admission_number", &req.admission_number) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        req.admission_number = req.admission_number.trim().to_string();

        let storage = self.get_storage(request);
        let user = respond_on_err!(profile_user(storage.as_ref(), req.user_id, UserRole::Student).await);
        if respond_on_err!(stored(storage.get_student_by_user_id(user.id).await)).is_some() {
            return Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "User already has a student profile",
            ));
        }
        if let Some(classroom_id) = req.classroom_id {
            respond_on_err!(found(
                storage.get_classroom(classroom_id).await,
                ErrorCode::NotFound,
                "Classroom not found",
            ));
        }

        match storage.enroll_application(id, req).await {
            Ok(Some(enrolled)) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrolled, "Applicant enrolled"))),
            Ok(None) => Ok(not_found(
                ErrorCode::ApplicationNotFound,
                "Application not found",
            )),
            Err(SchoolError::Validation(msg)) => {
                Ok(bad_request(ErrorCode::ApplicationInvalid, msg))
            }
            Err(SchoolError::Conflict(_)) => Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "Admission number already exists",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

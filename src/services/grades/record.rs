//! Grade writes, restricted to teachers and admins by the routes.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, check_score};
use crate::errors::SchoolError;
use crate::models::grades::requests::{CreateGradeRequest, UpdateGradeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, reject, respond_on_err,
};

impl GradeService {
    pub async fn create_grade(
        &self,
        req: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        respond_on_err!(found(
            storage.get_student(req.student_id).await,
            ErrorCode::StudentNotFound,
            "Student not found",
        ));
        let assessment = respond_on_err!(found(
            storage.get_assessment(req.assessment_id).await,
            ErrorCode::NotFound,
            "Assessment not found",
        ));
        if let Err(msg) = check_score(req.score, assessment.max_score) {
            return Ok(bad_request(ErrorCode::ScoreOutOfRange, msg));
        }

        match storage.create_grade(req, user.id).await {
            Ok(grade) => {
                info!(
                    "Recorded grade {} for student {} on assessment {}",
                    grade.letter_grade, grade.student_id, grade.assessment_id
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade recorded")))
            }
            Err(SchoolError::Conflict(_)) => Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "Student already has a grade for this assessment",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_grade(
        &self,
        id: i64,
        req: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let existing = respond_on_err!(found(
            storage.get_grade(id).await,
            ErrorCode::NotFound,
            "Grade not found",
        ));
        if let Some(score) = req.score
            && let Err(msg) = check_score(score, existing.max_score)
        {
            return Ok(bad_request(ErrorCode::ScoreOutOfRange, msg));
        }

        let grade = respond_on_err!(found(
            storage.update_grade(id, req).await,
            ErrorCode::NotFound,
            "Grade not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated")))
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_grade(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Grade not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

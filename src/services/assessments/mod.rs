use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, respond_on_err, stored,
};
use crate::utils::validate::validate_required;

crate::services::lazy_service!(AssessmentService);

fn check_scoring(max_score: Option<f64>, weight: Option<f64>) -> Result<(), HttpResponse> {
    if max_score.is_some_and(|m| !(m.is_finite() && m > 0.0)) {
        return Err(bad_request(
            ErrorCode::AssessmentInvalid,
            "max_score must be greater than zero",
        ));
    }
    if weight.is_some_and(|w| !(w.is_finite() && w >= 0.0)) {
        return Err(bad_request(
            ErrorCode::AssessmentInvalid,
            "weight must not be negative",
        ));
    }
    Ok(())
}

impl AssessmentService {
    pub async fn list_assessments(
        &self,
        query: AssessmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_assessments(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.term_id,
                    query.subject_id,
                    query.classroom_id,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Assessments retrieved")))
    }

    pub async fn create_assessment(
        &self,
        req: CreateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_required("name", &req.name) {
            return Ok(bad_request(ErrorCode::AssessmentInvalid, msg));
        }
        respond_on_err!(check_scoring(Some(req.max_score), Some(req.weight)));

        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        respond_on_err!(found(
            storage.get_term(req.term_id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));
        respond_on_err!(found(
            storage.get_subject(req.subject_id).await,
            ErrorCode::NotFound,
            "Subject not found",
        ));
        if let Some(classroom_id) = req.classroom_id {
            respond_on_err!(found(
                storage.get_classroom(classroom_id).await,
                ErrorCode::NotFound,
                "Classroom not found",
            ));
        }

        match storage.create_assessment(req, user.id).await {
            Ok(assessment) => {
                info!("Created {} '{}'", assessment.kind, assessment.name);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(assessment, "Assessment created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_assessment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let assessment = respond_on_err!(found(
            storage.get_assessment(id).await,
            ErrorCode::NotFound,
            "Assessment not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "Assessment retrieved")))
    }

    /// `max_score` may not drop below a score that is already recorded.
    pub async fn update_assessment(
        &self,
        id: i64,
        req: UpdateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond_on_err!(check_scoring(req.max_score, req.weight));

        let storage = self.get_storage(request);
        if let Some(max_score) = req.max_score {
            let highest = respond_on_err!(stored(storage.max_recorded_score(id).await));
            if let Some(highest) = highest
                && highest > max_score
            {
                return Ok(bad_request(
                    ErrorCode::ScoreOutOfRange,
                    format!("max_score {max_score} is below an already recorded score of {highest}"),
                ));
            }
        }
        if let Some(classroom_id) = req.classroom_id {
            respond_on_err!(found(
                storage.get_classroom(classroom_id).await,
                ErrorCode::NotFound,
                "Classroom not found",
            ));
        }

        let assessment = respond_on_err!(found(
            storage.update_assessment(id, req).await,
            ErrorCode::NotFound,
            "Assessment not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "Assessment updated")))
    }

    /// Removes the assessment and every grade recorded against it.
    pub async fn delete_assessment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_assessment(id).await {
            Ok(true) => {
                info!("Deleted assessment {} with its grades", id);
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assessment deleted")))
            }
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Assessment not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_rules() {
        assert!(check_scoring(Some(50.0), Some(0.0)).is_ok());
        assert!(check_scoring(None, None).is_ok());
        assert!(check_scoring(Some(0.0), None).is_err());
        assert!(check_scoring(Some(f64::NAN), None).is_err());
        assert!(check_scoring(None, Some(-1.0)).is_err());
    }
}

//! Public application intake and the review workflow.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::AdmissionService;
use crate::errors::SchoolError;
use crate::models::admissions::entities::ApplicationStatus;
use crate::models::admissions::requests::{
    ApplicationFilter, ApplicationListParams, SubmitApplicationRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, respond_on_err, stored,
};
use crate::utils::validate::{validate_email, validate_required};

/// Trims the free text fields, dropping optional ones left blank.
pub(crate) fn normalize_application(
    mut req: SubmitApplicationRequest,
    today: NaiveDate,
) -> Result<SubmitApplicationRequest, String> {
    validate_required("First name", &req.first_name)?;
    validate_required("Last name", &req.last_name)?;
    validate_required("Guardian name", &req.guardian_name)?;
    validate_required("Guardian phone", &req.guardian_phone)?;
    if req.date_of_birth >= today {
        return Err("Date of birth must be in the past".to_string());
    }

    let blank_to_none = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    req.first_name = req.first_name.trim().to_string();
    req.last_name = req.last_name.trim().to_string();
    req.guardian_name = req.guardian_name.trim().to_string();
    req.guardian_phone = req.guardian_phone.trim().to_string();
    req.guardian_email = blank_to_none(req.guardian_email);
    req.address = blank_to_none(req.address);
    req.previous_school = blank_to_none(req.previous_school);
    req.notes = blank_to_none(req.notes);

    if let Some(ref email) = req.guardian_email {
        validate_email(email).map_err(str::to_string)?;
    }
    Ok(req)
}

impl AdmissionService {
    pub async fn submit_application(
        &self,
        req: SubmitApplicationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let req = match normalize_application(req, chrono::Utc::now().date_naive()) {
            Ok(req) => req,
            Err(msg) => return Ok(bad_request(ErrorCode::ApplicationInvalid, msg)),
        };

        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_grade_level(req.grade_level_id).await,
            ErrorCode::NotFound,
            "Grade level not found",
        ));

        match storage.submit_application(req).await {
            Ok(application) => {
                info!(
                    "Application {} received for {} {}",
                    application.id, application.first_name, application.last_name
                );
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(application, "Application submitted")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn list_applications(
        &self,
        query: ApplicationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let filter = ApplicationFilter {
            status: query.status,
            grade_level_id: query.grade_level_id,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };
        let applications = respond_on_err!(stored(
            storage
                .list_applications(query.pagination.page(), query.pagination.size(), filter)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(applications, "Applications retrieved")))
    }

    pub async fn get_application(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let detail = respond_on_err!(found(
            storage.get_application_detail(id).await,
            ErrorCode::ApplicationNotFound,
            "Application not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Application retrieved")))
    }

    pub async fn start_review(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.move_to(id, ApplicationStatus::Review, request).await
    }

    pub async fn approve(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.move_to(id, ApplicationStatus::Approved, request).await
    }

    pub async fn reject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.move_to(id, ApplicationStatus::Rejected, request).await
    }

    async fn move_to(
        &self,
        id: i64,
        target: ApplicationStatus,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        match storage.set_application_status(id, target, user.id).await {
            Ok(Some(application)) => {
                info!("Application {} moved to {} by {}", id, target, user.username);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    application,
                    format!("Application {target}"),
                )))
            }
            Ok(None) => Ok(not_found(
                ErrorCode::ApplicationNotFound,
                "Application not found",
            )),
            Err(SchoolError::Validation(msg)) => {
                Ok(bad_request(ErrorCode::ApplicationInvalid, msg))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Gender;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn application() -> SubmitApplicationRequest {
        SubmitApplicationRequest {
            first_name: "  Rudo ".to_string(),
            last_name: "Ncube".to_string(),
            date_of_birth: day(2013, 6, 2),
            gender: Gender::Female,
            grade_level_id: 1,
            guardian_name: "Sipho Ncube".to_string(),
            guardian_phone: "+263 77 123 4567".to_string(),
            guardian_email: Some("   ".to_string()),
            address: None,
            previous_school: Some(" Hillside Primary ".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_application_is_trimmed() {
        let req = normalize_application(application(), day(2026, 1, 5)).expect("valid");
        assert_eq!(req.first_name, "Rudo");
        assert_eq!(req.guardian_email, None);
        assert_eq!(req.previous_school.as_deref(), Some("Hillside Primary"));
    }

    #[test]
    fn test_application_rules() {
        let today = day(2026, 1, 5);

        let mut req = application();
        req.guardian_phone = " ".to_string();
        assert!(normalize_application(req, today).is_err());

        let mut req = application();
        req.date_of_birth = today;
        assert!(normalize_application(req, today).is_err());

        let mut req = application();
        req.guardian_email = Some("not-an-email".to_string());
        assert!(normalize_application(req, today).is_err());
    }
}

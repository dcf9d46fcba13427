use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::{CreateTermRequest, TermListParams, UpdateTermRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};
use crate::utils::validate::validate_required;

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<(), HttpResponse> {
    if end < start {
        return Err(bad_request(
            ErrorCode::TermDateInvalid,
            "Term end date must not be before its start date",
        ));
    }
    Ok(())
}

impl AcademicsService {
    pub async fn list_terms(
        &self,
        query: TermListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_terms(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.academic_year.filter(|y| !y.trim().is_empty()),
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Terms retrieved")))
    }

    pub async fn create_term(
        &self,
        req: CreateTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        for (field, value) in [("name", &req.name), ("academic_year", &req.academic_year)] {
            if let Err(msg) = validate_required(field, value) {
                return Ok(bad_request(ErrorCode::BadRequest, msg));
            }
        }
        respond_on_err!(check_dates(req.start_date, req.end_date));

        let storage = self.get_storage(request);
        match storage.create_term(req).await {
            Ok(term) => {
                info!("Created term {} {}", term.name, term.academic_year);
                Ok(HttpResponse::Created().json(ApiResponse::success(term, "Term created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_term(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let term = respond_on_err!(found(
            storage.get_term(id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Term retrieved")))
    }

    /// Dates are checked against the stored values when only one side changes.
    pub async fn update_term(
        &self,
        id: i64,
        req: UpdateTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let existing = respond_on_err!(found(
            storage.get_term(id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));
        respond_on_err!(check_dates(
            req.start_date.unwrap_or(existing.start_date),
            req.end_date.unwrap_or(existing.end_date),
        ));

        let term = respond_on_err!(found(
            storage.update_term(id, req).await,
            ErrorCode::NotFound,
            "Term not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Term updated")))
    }

    pub async fn delete_term(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_term(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Term deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Term not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn set_current_term(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let term = respond_on_err!(found(
            storage.set_current_term(id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));
        info!("Current term is now {} {}", term.name, term.academic_year);
        Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Current term updated")))
    }

    pub async fn get_current_term(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let term = respond_on_err!(found(
            storage.get_current_term().await,
            ErrorCode::NoCurrentTerm,
            "No current term is set",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Current term retrieved")))
    }
}

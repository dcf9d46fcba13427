use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicsService;
use crate::models::academics::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};
use crate::utils::validate::validate_required;

const CREDIT_HOURS_MESSAGE: &str = "Credit hours must be at least 1";

impl AcademicsService {
    pub async fn list_subjects(
        &self,
        query: SubjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_subjects(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.search,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Subjects retrieved")))
    }

    pub async fn create_subject(
        &self,
        mut req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        for (field, value) in [("code", &req.code), ("name", &req.name)] {
            if let Err(msg) = validate_required(field, value) {
                return Ok(bad_request(ErrorCode::BadRequest, msg));
            }
        }
        if req.credit_hours < 1 {
            return Ok(bad_request(ErrorCode::BadRequest, CREDIT_HOURS_MESSAGE));
        }
        req.code = req.code.trim().to_ascii_uppercase();

        let storage = self.get_storage(request);
        match storage.create_subject(req).await {
            Ok(subject) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let subject = respond_on_err!(found(
            storage.get_subject(id).await,
            ErrorCode::NotFound,
            "Subject not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject retrieved")))
    }

    pub async fn update_subject(
        &self,
        id: i64,
        req: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if req.credit_hours.is_some_and(|h| h < 1) {
            return Ok(bad_request(ErrorCode::BadRequest, CREDIT_HOURS_MESSAGE));
        }

        let storage = self.get_storage(request);
        let subject = respond_on_err!(found(
            storage.update_subject(id, req).await,
            ErrorCode::NotFound,
            "Subject not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated")))
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_subject(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Subject not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

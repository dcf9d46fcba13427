use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::{
    CreateGradeLevelRequest, GradeLevelListParams, UpdateGradeLevelRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};
use crate::utils::validate::validate_required;

impl AcademicsService {
    pub async fn list_grade_levels(
        &self,
        query: GradeLevelListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_grade_levels(query.pagination.page(), query.pagination.size())
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Grade levels retrieved")))
    }

    pub async fn create_grade_level(
        &self,
        req: CreateGradeLevelRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_required("name", &req.name) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }

        let storage = self.get_storage(request);
        match storage.create_grade_level(req).await {
            Ok(level) => {
                info!("Created grade level '{}'", level.name);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(level, "Grade level created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_grade_level(
        &self,
        id: i64,
        req: UpdateGradeLevelRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Some(name) = &req.name
            && let Err(msg) = validate_required("name", name)
        {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }

        let storage = self.get_storage(request);
        let level = respond_on_err!(found(
            storage.update_grade_level(id, req).await,
            ErrorCode::NotFound,
            "Grade level not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(level, "Grade level updated")))
    }

    pub async fn delete_grade_level(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_grade_level(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade level deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Grade level not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

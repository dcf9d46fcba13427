//! Fee structures: the amount each grade level pays per fee type and term.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use crate::models::fees::requests::{
    CreateFeeStructureRequest, FeeStructureListParams, UpdateFeeStructureRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};

fn check_amount(amount_cents: i64) -> Result<(), HttpResponse> {
    if amount_cents <= 0 {
        return Err(bad_request(
            ErrorCode::InvoiceInvalid,
            "Fee amount must be greater than zero",
        ));
    }
    Ok(())
}

impl FeeService {
    pub async fn list_fee_structures(
        &self,
        query: FeeStructureListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_fee_structures(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.grade_level_id,
                    query.term_id,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Fee structures retrieved")))
    }

    pub async fn create_fee_structure(
        &self,
        req: CreateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        respond_on_err!(check_amount(req.amount_cents));

        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_grade_level(req.grade_level_id).await,
            ErrorCode::NotFound,
            "Grade level not found",
        ));
        respond_on_err!(found(
            storage.get_term(req.term_id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));

        match storage.create_fee_structure(req).await {
            Ok(structure) => {
                info!(
                    "Fee structure {} created: {} for grade level {}",
                    structure.id, structure.fee_type, structure.grade_level_id
                );
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(structure, "Fee structure created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_fee_structure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let structure = respond_on_err!(found(
            storage.get_fee_structure(id).await,
            ErrorCode::NotFound,
            "Fee structure not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(structure, "Fee structure retrieved")))
    }

    pub async fn update_fee_structure(
        &self,
        id: i64,
        req: UpdateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Some(amount) = req.amount_cents {
            respond_on_err!(check_amount(amount));
        }

        let storage = self.get_storage(request);
        let structure = respond_on_err!(found(
            storage.update_fee_structure(id, req).await,
            ErrorCode::NotFound,
            "Fee structure not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(structure, "Fee structure updated")))
    }

    pub async fn delete_fee_structure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_fee_structure(id).await {
            Ok(true) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Fee structure deleted")))
            }
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Fee structure not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

//! Invoice issuing, lookup and cancellation.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use crate::errors::SchoolError;
use crate::models::fees::entities::Invoice;
use crate::models::fees::requests::{
    CreateInvoiceRequest, GenerateInvoicesRequest, InvoiceFilter, InvoiceListParams,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo};
use crate::services::{
    bad_request, check_student_records, current_user, error_response, found, not_found,
    respond_on_err, stored,
};
use crate::storage::Storage;

/// Rule violations raised by the ledger carry the invoice code.
pub(super) fn invoice_error(err: &SchoolError) -> HttpResponse {
    match err {
        SchoolError::Validation(msg) => bad_request(ErrorCode::InvoiceInvalid, msg.clone()),
        _ => error_response(err),
    }
}

pub(crate) fn check_lines(req: &CreateInvoiceRequest) -> Result<(), String> {
    if req.lines.is_empty() {
        return Err("An invoice needs at least one line".to_string());
    }
    for line in &req.lines {
        if line.description.trim().is_empty() {
            return Err("Invoice line description is required".to_string());
        }
        if line.amount_cents <= 0 {
            return Err(format!(
                "Invoice line '{}' must have an amount greater than zero",
                line.description.trim()
            ));
        }
    }
    Ok(())
}

/// Students the caller may see invoices for; `None` means everyone.
async fn visible_students(
    storage: &dyn Storage,
    user: &User,
) -> crate::errors::Result<Option<Vec<i64>>> {
    if user.role.is_staff_member() {
        return Ok(None);
    }
    let ids = match user.role {
        UserRole::Student => storage
            .get_student_by_user_id(user.id)
            .await?
            .map(|s| vec![s.id])
            .unwrap_or_default(),
        UserRole::Parent => match storage.get_parent_by_user_id(user.id).await? {
            Some(parent) => storage
                .list_parent_students(parent.id)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    };
    Ok(Some(ids))
}

impl FeeService {
    pub async fn create_invoice(
        &self,
        req: CreateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        if let Err(msg) = check_lines(&req) {
            return Ok(bad_request(ErrorCode::InvoiceInvalid, msg));
        }

        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_student(req.student_id).await,
            ErrorCode::StudentNotFound,
            "Student not found",
        ));
        respond_on_err!(found(
            storage.get_term(req.term_id).await,
            ErrorCode::NotFound,
            "Term not found",
        ));

        match storage.create_invoice(req, user.id).await {
            Ok(detail) => {
                info!(
                    "Invoice {} issued to student {} by {}",
                    detail.invoice.invoice_number, detail.invoice.student_id, user.username
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(detail, "Invoice created")))
            }
            Err(e) => Ok(invoice_error(&e)),
        }
    }

    /// One invoice per active student of a grade level, built from its fee structures.
    pub async fn generate_invoices(
        &self,
        req: GenerateInvoicesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
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

        match storage.generate_invoices(req, user.id).await {
            Ok(result) => {
                info!(
                    "Generated {} invoices ({} skipped)",
                    result.created, result.skipped
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(result, "Invoices generated")))
            }
            Err(e) => Ok(invoice_error(&e)),
        }
    }

    pub async fn list_invoices(
        &self,
        query: InvoiceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let (page, size) = (query.pagination.page(), query.pagination.size());

        let student_ids =
            respond_on_err!(stored(visible_students(storage.as_ref(), &user).await));
        if student_ids.as_ref().is_some_and(|ids| ids.is_empty()) {
            let empty = PaginatedResponse::<Invoice> {
                items: Vec::new(),
                pagination: PaginationInfo::new(page, size, 0),
            };
            return Ok(HttpResponse::Ok().json(ApiResponse::success(empty, "Invoices retrieved")));
        }

        let filter = InvoiceFilter {
            student_id: query.student_id,
            student_ids,
            term_id: query.term_id,
            status: query.status,
        };
        let invoices = respond_on_err!(stored(storage.list_invoices(page, size, filter).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success(invoices, "Invoices retrieved")))
    }

    /// Invoice with its lines and payments.
    pub async fn get_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let detail = respond_on_err!(found(
            storage.get_invoice_detail(id).await,
            ErrorCode::NotFound,
            "Invoice not found",
        ));
        respond_on_err!(
            check_student_records(storage.as_ref(), &user, detail.invoice.student_id).await
        );
        Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Invoice retrieved")))
    }

    pub async fn cancel_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.cancel_invoice(id).await {
            Ok(Some(invoice)) => {
                info!("Invoice {} cancelled", invoice.invoice_number);
                Ok(HttpResponse::Ok().json(ApiResponse::success(invoice, "Invoice cancelled")))
            }
            Ok(None) => Ok(not_found(ErrorCode::NotFound, "Invoice not found")),
            Err(e) => Ok(invoice_error(&e)),
        }
    }

    pub async fn delete_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_invoice(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Invoice deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Invoice not found")),
            Err(e) => Ok(invoice_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fees::requests::InvoiceLineInput;

    fn request(lines: Vec<(&str, i64)>) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            student_id: 1,
            term_id: 1,
            due_date: None,
            notes: None,
            lines: lines
                .into_iter()
                .map(|(description, amount_cents)| InvoiceLineInput {
                    description: description.to_string(),
                    amount_cents,
                    fee_structure_id: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_invoice_lines_are_checked() {
        assert!(check_lines(&request(vec![("Tuition", 35_000), ("Sports", 1_500)])).is_ok());
        assert!(check_lines(&request(vec![])).is_err());
        assert!(check_lines(&request(vec![("Tuition", 0)])).is_err());
        assert!(check_lines(&request(vec![("  ", 100)])).is_err());
    }

    #[test]
    fn test_ledger_violations_use_invoice_code() {
        let response = invoice_error(&SchoolError::validation("Invoice has payments"));
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let response = invoice_error(&SchoolError::not_found("Invoice not found"));
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}

//! Counter payments, simulated gateway payments and receipts.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{info, warn};

use super::{FeeService, ledger};
use crate::errors::SchoolError;
use crate::models::fees::entities::{NewPayment, PaymentGateway};
use crate::models::fees::requests::{GatewayPaymentRequest, RecordPaymentRequest};
use crate::models::fees::responses::PaymentReceipt;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, can_access_student, check_student_records, current_user, error_response, forbidden,
    found, respond_on_err, stored,
};

fn payment_error(err: &SchoolError) -> HttpResponse {
    match err {
        SchoolError::Validation(msg) => bad_request(ErrorCode::PaymentRejected, msg.clone()),
        _ => error_response(err),
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FeeService {
    /// Payment taken at the bursar's office.
    pub async fn record_payment(
        &self,
        invoice_id: i64,
        req: RecordPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_invoice(invoice_id).await,
            ErrorCode::NotFound,
            "Invoice not found",
        ));

        let payment = NewPayment {
            invoice_id,
            amount_cents: req.amount_cents,
            method: req.method,
            reference: optional_text(req.reference),
            transaction_id: None,
            paid_on: req.paid_on.unwrap_or_else(|| Utc::now().date_naive()),
            received_by: Some(user.id),
        };
        match storage.record_payment(payment).await {
            Ok(payment) => {
                info!(
                    "Payment {} of {} recorded on invoice {} by {}",
                    payment.receipt_number, payment.amount_cents, invoice_id, user.username
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(payment, "Payment recorded")))
            }
            Err(e) => Ok(payment_error(&e)),
        }
    }

    /// Payment through a mobile money or bank gateway. The gateway call is
    /// simulated and always settles immediately.
    pub async fn pay_with_gateway(
        &self,
        invoice_id: i64,
        gateway: &str,
        req: GatewayPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let gateway = match gateway.to_ascii_lowercase().parse::<PaymentGateway>() {
            Ok(gateway) => gateway,
            Err(msg) => return Ok(bad_request(ErrorCode::GatewayUnknown, msg)),
        };

        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let invoice = respond_on_err!(found(
            storage.get_invoice(invoice_id).await,
            ErrorCode::NotFound,
            "Invoice not found",
        ));

        let allowed = match user.role {
            UserRole::Admin => true,
            UserRole::Student | UserRole::Parent => {
                let student = respond_on_err!(found(
                    storage.get_student(invoice.student_id).await,
                    ErrorCode::StudentNotFound,
                    "Student not found",
                ));
                respond_on_err!(stored(
                    can_access_student(storage.as_ref(), &user, &student).await
                ))
            }
            _ => false,
        };
        if !allowed {
            warn!(
                "User {} tried to pay invoice {} via {}",
                user.username, invoice.invoice_number, gateway
            );
            return Ok(forbidden("You cannot pay this invoice"));
        }

        let now = Utc::now();
        let payment = NewPayment {
            invoice_id,
            amount_cents: req.amount_cents,
            method: gateway.payment_method(),
            reference: optional_text(req.payer_reference),
            transaction_id: Some(ledger::gateway_transaction_id(gateway, now)),
            paid_on: now.date_naive(),
            received_by: None,
        };
        match storage.record_payment(payment).await {
            Ok(payment) => {
                info!(
                    "{} payment {} settled invoice {} for {}",
                    gateway,
                    payment.transaction_id.as_deref().unwrap_or_default(),
                    invoice.invoice_number,
                    payment.amount_cents
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    payment,
                    format!("Payment processed via {gateway}"),
                )))
            }
            Err(e) => Ok(payment_error(&e)),
        }
    }

    pub async fn list_payments(
        &self,
        invoice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let invoice = respond_on_err!(found(
            storage.get_invoice(invoice_id).await,
            ErrorCode::NotFound,
            "Invoice not found",
        ));
        respond_on_err!(check_student_records(storage.as_ref(), &user, invoice.student_id).await);

        let payments = respond_on_err!(stored(storage.list_payments(invoice_id).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success(payments, "Payments retrieved")))
    }

    /// Receipt view of one payment.
    pub async fn get_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let payment = respond_on_err!(found(
            storage.get_payment(id).await,
            ErrorCode::NotFound,
            "Payment not found",
        ));
        let invoice = respond_on_err!(found(
            storage.get_invoice(payment.invoice_id).await,
            ErrorCode::NotFound,
            "Invoice not found",
        ));
        respond_on_err!(check_student_records(storage.as_ref(), &user, invoice.student_id).await);

        let config = self.get_config();
        let receipt = PaymentReceipt {
            payment,
            invoice,
            school_name: config.app.school_name.clone(),
            currency: config.app.currency.clone(),
        };
        Ok(HttpResponse::Ok().json(ApiResponse::success(receipt, "Receipt retrieved")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_rejected_payment_is_bad_request() {
        let response = payment_error(&SchoolError::validation("Invoice is already paid"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = payment_error(&SchoolError::database_operation("down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_blank_reference_is_dropped() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(
            optional_text(Some(" 0771234567 ".to_string())),
            Some("0771234567".to_string())
        );
        assert_eq!(optional_text(None), None);
    }
}

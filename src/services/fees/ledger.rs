//! Invoice and payment arithmetic. All amounts are integer cents.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::fees::entities::{InvoiceStatus, PaymentGateway};

/// Never negative; an overpaid invoice has nothing outstanding.
pub fn outstanding(total_cents: i64, paid_cents: i64) -> i64 {
    (total_cents - paid_cents).max(0)
}

/// Open invoices past their due date. Paid and cancelled invoices are never overdue.
pub fn is_overdue(status: InvoiceStatus, due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(status, InvoiceStatus::Issued | InvoiceStatus::Partial)
        && due_date.is_some_and(|due| due < today)
}

/// Status derived from the paid amount.
pub fn status_for(total_cents: i64, paid_cents: i64) -> InvoiceStatus {
    if paid_cents >= total_cents && total_cents > 0 {
        InvoiceStatus::Paid
    } else if paid_cents > 0 {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Issued
    }
}

/// Checks a payment of `amount_cents` against an invoice.
pub fn check_payment(
    status: InvoiceStatus,
    total_cents: i64,
    paid_cents: i64,
    amount_cents: i64,
) -> Result<(), String> {
    if amount_cents <= 0 {
        return Err("Payment amount must be greater than zero".to_string());
    }
    match status {
        InvoiceStatus::Cancelled => return Err("Invoice is cancelled".to_string()),
        InvoiceStatus::Paid => return Err("Invoice is already paid".to_string()),
        _ => {}
    }
    let due = outstanding(total_cents, paid_cents);
    if amount_cents > due {
        return Err(format!(
            "Payment of {amount_cents} exceeds the outstanding balance of {due}"
        ));
    }
    Ok(())
}

pub fn invoice_number(id: i64) -> String {
    format!("INV-{id:06}")
}

pub fn receipt_number(id: i64) -> String {
    format!("RCT{id:06}")
}

/// Unique placeholder written before the row id is known.
pub fn pending_number(prefix: &str) -> String {
    format!("{prefix}-PENDING-{}", uuid::Uuid::new_v4().simple())
}

/// Synthetic gateway reference: prefix, UTC timestamp and six hex digits.
pub fn gateway_transaction_id(gateway: PaymentGateway, at: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}{}{}",
        gateway.transaction_prefix(),
        at.format("%Y%m%d%H%M%S"),
        suffix[..6].to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_outstanding_never_negative() {
        assert_eq!(outstanding(10_000, 2_500), 7_500);
        assert_eq!(outstanding(10_000, 10_000), 0);
        assert_eq!(outstanding(10_000, 12_000), 0);
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(status_for(10_000, 0), InvoiceStatus::Issued);
        assert_eq!(status_for(10_000, 1), InvoiceStatus::Partial);
        assert_eq!(status_for(10_000, 9_999), InvoiceStatus::Partial);
        assert_eq!(status_for(10_000, 10_000), InvoiceStatus::Paid);
    }

    #[test]
    fn test_overdue_only_for_open_invoices() {
        let today = date(2025, 3, 10);
        let past = Some(date(2025, 3, 9));
        assert!(is_overdue(InvoiceStatus::Issued, past, today));
        assert!(is_overdue(InvoiceStatus::Partial, past, today));
        assert!(!is_overdue(InvoiceStatus::Paid, past, today));
        assert!(!is_overdue(InvoiceStatus::Cancelled, past, today));
        assert!(!is_overdue(InvoiceStatus::Issued, Some(today), today));
        assert!(!is_overdue(InvoiceStatus::Issued, None, today));
    }

    #[test]
    fn test_payment_checks() {
        assert!(check_payment(InvoiceStatus::Issued, 10_000, 0, 10_000).is_ok());
        assert!(check_payment(InvoiceStatus::Partial, 10_000, 4_000, 6_000).is_ok());
        assert!(check_payment(InvoiceStatus::Partial, 10_000, 4_000, 6_001).is_err());
        assert!(check_payment(InvoiceStatus::Issued, 10_000, 0, 0).is_err());
        assert!(check_payment(InvoiceStatus::Issued, 10_000, 0, -5).is_err());
        assert!(check_payment(InvoiceStatus::Cancelled, 10_000, 0, 100).is_err());
        assert!(check_payment(InvoiceStatus::Paid, 10_000, 10_000, 100).is_err());
    }

    #[test]
    fn test_document_numbers() {
        assert_eq!(invoice_number(1), "INV-000001");
        assert_eq!(invoice_number(1_234_567), "INV-1234567");
        assert_eq!(receipt_number(42), "RCT000042");
        assert_ne!(pending_number("INV"), pending_number("INV"));
    }

    #[test]
    fn test_gateway_transaction_id_shape() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 8, 5, 9).unwrap();
        let id = gateway_transaction_id(PaymentGateway::Ecocash, at);
        assert!(id.starts_with("ECO20250131080509"));
        assert_eq!(id.len(), "ECO".len() + 14 + 6);
        assert!(id[17..].chars().all(|c| c.is_ascii_hexdigit()));

        let id = gateway_transaction_id(PaymentGateway::Bank, at);
        assert!(id.starts_with("BANK20250131080509"));
    }
}

use serde::Serialize;
use ts_rs::TS;

use super::entities::{Invoice, InvoiceLine, Payment, StatusCount};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct GenerateInvoicesResponse {
    pub created: i64,
    pub skipped: i64,
    pub invoice_numbers: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub invoice: Invoice,
    pub school_name: String,
    pub currency: String,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct FeeSummary {
    pub term_id: Option<i64>,
    pub invoiced_cents: i64,
    pub collected_cents: i64,
    pub outstanding_cents: i64,
    pub invoice_count: i64,
    pub by_status: Vec<StatusCount>,
}

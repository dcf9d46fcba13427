use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FeeType, InvoiceStatus, PaymentMethod};
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct FeeStructureListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade_level_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct CreateFeeStructureRequest {
    pub grade_level_id: i64,
    pub term_id: i64,
    pub fee_type: FeeType,
    pub amount_cents: i64,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct UpdateFeeStructureRequest {
    pub amount_cents: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct InvoiceLineInput {
    pub description: String,
    pub amount_cents: i64,
    pub fee_structure_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct CreateInvoiceRequest {
    pub student_id: i64,
    pub term_id: i64,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub lines: Vec<InvoiceLineInput>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct GenerateInvoicesRequest {
    pub grade_level_id: i64,
    pub term_id: i64,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct InvoiceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
}

/// Storage-level invoice filter.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub student_id: Option<i64>,
    /// Restricts to these students; used for parents.
    pub student_ids: Option<Vec<i64>>,
    pub term_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct RecordPaymentRequest {
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    /// Defaults to today.
    pub paid_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct GatewayPaymentRequest {
    pub amount_cents: i64,
    /// Payer's mobile number or account reference at the gateway.
    pub payer_reference: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct FeeSummaryParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
}

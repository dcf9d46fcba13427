use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "fees.ts")]
    pub enum FeeType {
        Tuition => "tuition",
        Boarding => "boarding",
        Transport => "transport",
        Exam => "exam",
        Library => "library",
        Laboratory => "laboratory",
        Sports => "sports",
        Uniform => "uniform",
        Other => "other",
    }
}

string_enum! {
    #[ts(export, export_to = "fees.ts")]
    pub enum InvoiceStatus {
        Issued => "ISSUED",
        Partial => "PARTIAL",
        Paid => "PAID",
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    #[ts(export, export_to = "fees.ts")]
    pub enum PaymentMethod {
        Cash => "cash",
        BankTransfer => "bank_transfer",
        Ecocash => "ecocash",
        Innbucks => "innbucks",
        Card => "card",
        Cheque => "cheque",
    }
}

string_enum! {
    #[ts(export, export_to = "fees.ts")]
    pub enum PaymentGateway {
        Ecocash => "ecocash",
        Innbucks => "innbucks",
        Bank => "bank",
    }
}

impl PaymentGateway {
    /// Prefix of the synthetic transaction id.
    pub fn transaction_prefix(&self) -> &'static str {
        match self {
            PaymentGateway::Ecocash => "ECO",
            PaymentGateway::Innbucks => "INN",
            PaymentGateway::Bank => "BANK",
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            PaymentGateway::Ecocash => PaymentMethod::Ecocash,
            PaymentGateway::Innbucks => PaymentMethod::Innbucks,
            PaymentGateway::Bank => PaymentMethod::BankTransfer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct FeeStructure {
    pub id: i64,
    pub grade_level_id: i64,
    pub term_id: i64,
    pub fee_type: FeeType,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invoice header with its ledger figures.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub student_id: i64,
    pub term_id: i64,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub total_cents: i64,
    pub paid_cents: i64,
    pub outstanding_cents: i64,
    pub is_overdue: bool,
    pub notes: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct InvoiceLine {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub fee_structure_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: String,
    pub paid_on: NaiveDate,
    pub received_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Payment to be written by storage; the receipt number is assigned there.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub invoice_id: i64,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub transaction_id: Option<String>,
    pub paid_on: NaiveDate,
    pub received_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fees.ts")]
pub struct StatusCount {
    pub status: InvoiceStatus,
    pub count: i64,
}

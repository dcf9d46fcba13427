use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub student_id: i64,
    pub term_id: i64,
    pub status: String,
    pub issue_date: Date,
    pub due_date: Option<Date>,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::invoice_lines::Entity")]
    Lines,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::invoice_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `paid_cents` is the sum of the invoice's payments; `today` decides
    /// whether an open invoice is overdue.
    pub fn into_invoice(
        self,
        paid_cents: i64,
        today: Date,
    ) -> crate::models::fees::entities::Invoice {
        use crate::models::fees::entities::{Invoice, InvoiceStatus};
        use crate::services::fees::ledger;

        let status = self
            .status
            .parse::<InvoiceStatus>()
            .unwrap_or(InvoiceStatus::Issued);
        Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            student_id: self.student_id,
            term_id: self.term_id,
            status,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total_cents: self.total_cents,
            paid_cents,
            outstanding_cents: ledger::outstanding(self.total_cents, paid_cents),
            is_overdue: ledger::is_overdue(status, self.due_date, today),
            notes: self.notes,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

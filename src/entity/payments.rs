use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub invoice_id: i64,
    pub amount_cents: i64,
    pub method: String,
    pub reference: Option<String>,
    pub transaction_id: Option<String>,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub paid_on: Date,
    pub received_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id",
        on_delete = "Cascade"
    )]
    Invoice,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::fees::entities::Payment {
        use crate::models::fees::entities::{Payment, PaymentMethod};

        Payment {
            id: self.id,
            invoice_id: self.invoice_id,
            amount_cents: self.amount_cents,
            method: self
                .method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            reference: self.reference,
            transaction_id: self.transaction_id,
            receipt_number: self.receipt_number,
            paid_on: self.paid_on,
            received_by: self.received_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}

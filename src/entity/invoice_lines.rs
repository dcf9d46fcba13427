use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoice_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub amount_cents: i64,
    pub fee_structure_id: Option<i64>,
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
    pub fn into_invoice_line(self) -> crate::models::fees::entities::InvoiceLine {
        crate::models::fees::entities::InvoiceLine {
            id: self.id,
            invoice_id: self.invoice_id,
            description: self.description,
            amount_cents: self.amount_cents,
            fee_structure_id: self.fee_structure_id,
        }
    }
}

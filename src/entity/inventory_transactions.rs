use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub item_id: i64,
    pub kind: String,
    pub quantity: i64,
    pub stock_after: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub processed_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_items::Entity",
        from = "Column::ItemId",
        to = "super::inventory_items::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::inventory_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_transaction(self) -> crate::models::inventory::entities::InventoryTransaction {
        use crate::models::inventory::entities::{InventoryTransaction, TransactionKind};

        InventoryTransaction {
            id: self.id,
            item_id: self.item_id,
            kind: self
                .kind
                .parse::<TransactionKind>()
                .unwrap_or(TransactionKind::Adjustment),
            quantity: self.quantity,
            stock_after: self.stock_after,
            reference: self.reference,
            notes: self.notes,
            processed_by: self.processed_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}

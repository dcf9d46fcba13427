use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub item_code: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory_transactions::Entity")]
    Transactions,
}

impl Related<super::inventory_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_item(self) -> crate::models::inventory::entities::InventoryItem {
        use crate::models::inventory::entities::{InventoryItem, ItemCategory};

        InventoryItem {
            id: self.id,
            item_code: self.item_code,
            name: self.name,
            category: self
                .category
                .parse::<ItemCategory>()
                .unwrap_or(ItemCategory::Other),
            description: self.description,
            unit_price_cents: self.unit_price_cents,
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            location: self.location,
            is_active: self.is_active,
            is_low_stock: crate::services::inventory::stock::is_low_stock(
                self.current_stock,
                self.minimum_stock,
            ),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

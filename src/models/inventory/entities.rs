use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "inventory.ts")]
    pub enum ItemCategory {
        Stationery => "stationery",
        Furniture => "furniture",
        Electronics => "electronics",
        Laboratory => "laboratory",
        Sports => "sports",
        Cleaning => "cleaning",
        Food => "food",
        Uniform => "uniform",
        Other => "other",
    }
}

string_enum! {
    #[ts(export, export_to = "inventory.ts")]
    pub enum TransactionKind {
        In => "in",
        Out => "out",
        Adjustment => "adjustment",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct InventoryItem {
    pub id: i64,
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_low_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct InventoryTransaction {
    pub id: i64,
    pub item_id: i64,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub stock_after: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub processed_by: i64,
    pub created_at: DateTime<Utc>,
}

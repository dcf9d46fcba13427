use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ItemCategory, TransactionKind};
use crate::models::common::{PaginationQuery, deserialize_optional_bool};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct ItemListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<ItemCategory>,
    pub search: Option<String>,
    /// Only items at or below their minimum stock.
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub low_stock: Option<bool>,
}

/// Storage-level item filter.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<ItemCategory>,
    pub search: Option<String>,
    pub low_stock: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct CreateItemRequest {
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub unit_price_cents: Option<i64>,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub minimum_stock: i64,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    pub description: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct StockMovementRequest {
    pub kind: TransactionKind,
    pub quantity: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct TransactionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

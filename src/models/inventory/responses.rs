use serde::Serialize;
use ts_rs::TS;

use super::entities::{InventoryItem, InventoryTransaction};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "inventory.ts")]
pub struct StockMovementResponse {
    pub item: InventoryItem,
    pub transaction: InventoryTransaction,
}

pub mod items;
pub mod stock;

crate::services::lazy_service!(InventoryService);

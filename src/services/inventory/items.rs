//! Inventory items and their stock movements.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InventoryService;
use crate::errors::SchoolError;
use crate::models::inventory::requests::{
    CreateItemRequest, ItemFilter, ItemListParams, StockMovementRequest, TransactionListParams,
    UpdateItemRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, reject, respond_on_err, stored,
};

fn check_new_item(req: &CreateItemRequest) -> Result<(), String> {
    if req.item_code.trim().is_empty() {
        return Err("Item code is required".to_string());
    }
    if req.name.trim().is_empty() {
        return Err("Item name is required".to_string());
    }
    check_levels(Some(req.current_stock), Some(req.minimum_stock), req.unit_price_cents)
}

fn check_levels(
    current_stock: Option<i64>,
    minimum_stock: Option<i64>,
    unit_price_cents: Option<i64>,
) -> Result<(), String> {
    if current_stock.is_some_and(|v| v < 0) {
        return Err("Current stock cannot be negative".to_string());
    }
    if minimum_stock.is_some_and(|v| v < 0) {
        return Err("Minimum stock cannot be negative".to_string());
    }
    if unit_price_cents.is_some_and(|v| v < 0) {
        return Err("Unit price cannot be negative".to_string());
    }
    Ok(())
}

impl InventoryService {
    pub async fn list_items(
        &self,
        query: ItemListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let filter = ItemFilter {
            category: query.category,
            search: query.search.filter(|s| !s.trim().is_empty()),
            low_stock: query.low_stock.unwrap_or(false),
        };
        let items = respond_on_err!(stored(
            storage
                .list_items(query.pagination.page(), query.pagination.size(), filter)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Items retrieved")))
    }

    pub async fn create_item(
        &self,
        mut req: CreateItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_new_item(&req) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        req.item_code = req.item_code.trim().to_uppercase();
        req.name = req.name.trim().to_string();

        let storage = self.get_storage(request);
        match storage.create_item(req).await {
            Ok(item) => {
                info!("Inventory item {} created", item.item_code);
                Ok(HttpResponse::Created().json(ApiResponse::success(item, "Item created")))
            }
            Err(SchoolError::Conflict(_)) => Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "Item code already exists",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_item(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let item = respond_on_err!(found(
            storage.get_item(id).await,
            ErrorCode::NotFound,
            "Item not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(item, "Item retrieved")))
    }

    /// Stock levels only change through movements.
    pub async fn update_item(
        &self,
        id: i64,
        req: UpdateItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_levels(None, req.minimum_stock, req.unit_price_cents) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Ok(bad_request(ErrorCode::BadRequest, "Item name is required"));
        }

        let storage = self.get_storage(request);
        let item = respond_on_err!(found(
            storage.update_item(id, req).await,
            ErrorCode::NotFound,
            "Item not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(item, "Item updated")))
    }

    pub async fn delete_item(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.soft_delete_item(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Item deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Item not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn record_movement(
        &self,
        item_id: i64,
        req: StockMovementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let kind = req.kind;

        match storage.record_stock_movement(item_id, req, user.id).await {
            Ok(result) => {
                info!(
                    "Stock {} of {} on {}: now {}",
                    kind,
                    result.transaction.quantity,
                    result.item.item_code,
                    result.transaction.stock_after
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(result, "Stock updated")))
            }
            Err(SchoolError::Validation(msg)) => {
                Ok(bad_request(ErrorCode::StockInsufficient, msg))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn list_transactions(
        &self,
        item_id: i64,
        query: TransactionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_item(item_id).await,
            ErrorCode::NotFound,
            "Item not found",
        ));
        let transactions = respond_on_err!(stored(
            storage
                .list_item_transactions(item_id, query.pagination.page(), query.pagination.size())
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(transactions, "Transactions retrieved")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::entities::ItemCategory;

    fn item(code: &str, stock: i64, minimum: i64) -> CreateItemRequest {
        CreateItemRequest {
            item_code: code.to_string(),
            name: "Exercise books".to_string(),
            category: ItemCategory::Stationery,
            description: None,
            unit_price_cents: Some(150),
            current_stock: stock,
            minimum_stock: minimum,
            location: None,
        }
    }

    #[test]
    fn test_new_item_checks() {
        assert!(check_new_item(&item("STA-001", 100, 20)).is_ok());
        assert!(check_new_item(&item(" ", 100, 20)).is_err());
        assert!(check_new_item(&item("STA-001", -1, 20)).is_err());
        assert!(check_new_item(&item("STA-001", 0, -5)).is_err());
    }
}

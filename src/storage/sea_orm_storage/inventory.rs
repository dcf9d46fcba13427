use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{inventory_items, inventory_transactions};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::inventory::{
    entities::{InventoryItem, InventoryTransaction},
    requests::{CreateItemRequest, ItemFilter, StockMovementRequest, UpdateItemRequest},
    responses::StockMovementResponse,
};
use crate::services::inventory::stock;
use crate::utils::contains_pattern;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_item_impl(&self, req: CreateItemRequest) -> Result<InventoryItem> {
        let now = now_ts();
        let model = inventory_items::ActiveModel {
            item_code: Set(req.item_code),
            name: Set(req.name),
            category: Set(req.category.to_string()),
            description: Set(req.description),
            unit_price_cents: Set(req.unit_price_cents),
            current_stock: Set(req.current_stock),
            minimum_stock: Set(req.minimum_stock),
            location: Set(req.location),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create item"))?;
        Ok(row.into_item())
    }

    pub async fn get_item_impl(&self, id: i64) -> Result<Option<InventoryItem>> {
        let row = inventory_items::Entity::find_by_id(id)
            .filter(inventory_items::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query item"))?;
        Ok(row.map(|m| m.into_item()))
    }

    pub async fn list_items_impl(
        &self,
        page: i64,
        size: i64,
        filter: ItemFilter,
    ) -> Result<PaginatedResponse<InventoryItem>> {
        let mut select =
            inventory_items::Entity::find().filter(inventory_items::Column::IsActive.eq(true));
        if let Some(category) = filter.category {
            select = select.filter(inventory_items::Column::Category.eq(category.as_str()));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(inventory_items::Column::ItemCode.like(contains_pattern(search)))
                    .add(inventory_items::Column::Name.like(contains_pattern(search))),
            );
        }
        if filter.low_stock {
            select = select.filter(
                Expr::col(inventory_items::Column::CurrentStock)
                    .lte(Expr::col(inventory_items::Column::MinimumStock)),
            );
        }
        select = select.order_by_asc(inventory_items::Column::ItemCode);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list items")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_item()).collect(),
            pagination,
        })
    }

    pub async fn update_item_impl(
        &self,
        id: i64,
        req: UpdateItemRequest,
    ) -> Result<Option<InventoryItem>> {
        if self.get_item_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = inventory_items::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(category) = req.category {
            model.category = Set(category.to_string());
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(unit_price_cents) = req.unit_price_cents {
            model.unit_price_cents = Set(Some(unit_price_cents));
        }
        if let Some(minimum_stock) = req.minimum_stock {
            model.minimum_stock = Set(minimum_stock);
        }
        if let Some(location) = req.location {
            model.location = Set(Some(location));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update item"))?;
        Ok(Some(row.into_item()))
    }

    pub async fn soft_delete_item_impl(&self, id: i64) -> Result<bool> {
        let result = inventory_items::Entity::update_many()
            .col_expr(inventory_items::Column::IsActive, Expr::value(false))
            .col_expr(inventory_items::Column::UpdatedAt, Expr::value(now_ts()))
            .filter(inventory_items::Column::Id.eq(id))
            .filter(inventory_items::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete item"))?;
        Ok(result.rows_affected > 0)
    }

    /// Applies the movement to the item and writes the ledger row in one
    /// transaction.
    pub async fn record_stock_movement_impl(
        &self,
        item_id: i64,
        req: StockMovementRequest,
        processed_by: i64,
    ) -> Result<StockMovementResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let item = inventory_items::Entity::find_by_id(item_id)
            .filter(inventory_items::Column::IsActive.eq(true))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to query item"))?
            .ok_or_else(|| SchoolError::not_found("Inventory item not found"))?;

        let stock_after = stock::apply_movement(item.current_stock, req.kind, req.quantity)
            .map_err(SchoolError::validation)?;

        // Only applies if the level read above is still current.
        let now = now_ts();
        let updated = inventory_items::Entity::update_many()
            .col_expr(inventory_items::Column::CurrentStock, Expr::value(stock_after))
            .col_expr(inventory_items::Column::UpdatedAt, Expr::value(now))
            .filter(inventory_items::Column::Id.eq(item.id))
            .filter(inventory_items::Column::CurrentStock.eq(item.current_stock))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to update stock"))?;
        if updated.rows_affected == 0 {
            return Err(SchoolError::conflict(
                "Stock level changed during the movement, retry",
            ));
        }
        let item = inventory_items::Model {
            current_stock: stock_after,
            updated_at: now,
            ..item
        };

        let transaction = inventory_transactions::ActiveModel {
            item_id: Set(item_id),
            kind: Set(req.kind.to_string()),
            quantity: Set(req.quantity),
            stock_after: Set(stock_after),
            reference: Set(req.reference),
            notes: Set(req.notes),
            processed_by: Set(processed_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to record stock movement"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(StockMovementResponse {
            item: item.into_item(),
            transaction: transaction.into_transaction(),
        })
    }

    pub async fn list_item_transactions_impl(
        &self,
        item_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<InventoryTransaction>> {
        let select = inventory_transactions::Entity::find()
            .filter(inventory_transactions::Column::ItemId.eq(item_id))
            .order_by_desc(inventory_transactions::Column::CreatedAt)
            .order_by_desc(inventory_transactions::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list stock movements")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_transaction()).collect(),
            pagination,
        })
    }
}

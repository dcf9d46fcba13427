use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::inventory::requests::{
    CreateItemRequest, ItemListParams, StockMovementRequest, TransactionListParams,
    UpdateItemRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InventoryService;
use crate::utils::SafeIDI64;

// Lazily initialised global InventoryService
static INVENTORY_SERVICE: Lazy<InventoryService> = Lazy::new(InventoryService::new_lazy);

pub async fn list_items(
    request: HttpRequest,
    query: web::Query<ItemListParams>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.list_items(query.into_inner(), &request).await
}

pub async fn create_item(
    request: HttpRequest,
    body: web::Json<CreateItemRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.create_item(body.into_inner(), &request).await
}

pub async fn get_item(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.get_item(id.0, &request).await
}

pub async fn update_item(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateItemRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .update_item(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_item(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.delete_item(id.0, &request).await
}

pub async fn record_movement(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<StockMovementRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .record_movement(id.0, body.into_inner(), &request)
        .await
}

pub async fn list_transactions(
    request: HttpRequest,
    id: SafeIDI64,
    query: web::Query<TransactionListParams>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .list_transactions(id.0, query.into_inner(), &request)
        .await
}

pub fn configure_inventory_routes(cfg: &mut web::ServiceConfig) {
    let storekeepers = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/inventory/items")
            .wrap(middlewares::RequireRole::new_any(
                UserRole::school_staff_roles(),
            ))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_items))
                    .route(web::post().to(create_item).wrap(storekeepers())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_item))
                    .route(web::put().to(update_item).wrap(storekeepers()))
                    .route(web::delete().to(delete_item).wrap(storekeepers())),
            )
            .service(
                web::resource("/{id}/transactions")
                    .route(web::get().to(list_transactions))
                    .route(web::post().to(record_movement).wrap(storekeepers())),
            ),
    );
}

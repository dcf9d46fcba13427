use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::fees::requests::{
    CreateFeeStructureRequest, CreateInvoiceRequest, FeeStructureListParams, FeeSummaryParams,
    GatewayPaymentRequest, GenerateInvoicesRequest, InvoiceListParams, RecordPaymentRequest,
    UpdateFeeStructureRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FeeService;
use crate::utils::SafeIDI64;

// Lazily initialised global FeeService
static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

fn bursary() -> middlewares::RequireRole {
    middlewares::RequireRole::new_any(UserRole::staff_roles())
}

// Fee structures
pub async fn list_fee_structures(
    request: HttpRequest,
    query: web::Query<FeeStructureListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .list_fee_structures(query.into_inner(), &request)
        .await
}

pub async fn create_fee_structure(
    request: HttpRequest,
    body: web::Json<CreateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .create_fee_structure(body.into_inner(), &request)
        .await
}

pub async fn get_fee_structure(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_fee_structure(id.0, &request).await
}

pub async fn update_fee_structure(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .update_fee_structure(id.0, body.into_inner(), &request)
        .await
}

pub async fn delete_fee_structure(
    request: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_fee_structure(id.0, &request).await
}

// Invoices
pub async fn list_invoices(
    request: HttpRequest,
    query: web::Query<InvoiceListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_invoices(query.into_inner(), &request).await
}

pub async fn create_invoice(
    request: HttpRequest,
    body: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_invoice(body.into_inner(), &request).await
}

pub async fn generate_invoices(
    request: HttpRequest,
    body: web::Json<GenerateInvoicesRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .generate_invoices(body.into_inner(), &request)
        .await
}

pub async fn get_invoice(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_invoice(id.0, &request).await
}

pub async fn cancel_invoice(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.cancel_invoice(id.0, &request).await
}

pub async fn delete_invoice(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_invoice(id.0, &request).await
}

// Payments
pub async fn list_payments(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_payments(id.0, &request).await
}

pub async fn record_payment(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .record_payment(id.0, body.into_inner(), &request)
        .await
}

pub async fn pay_with_gateway(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GatewayPaymentRequest>,
) -> ActixResult<HttpResponse> {
    let gateway = request.match_info().query("gateway").to_string();
    FEE_SERVICE
        .pay_with_gateway(id.0, &gateway, body.into_inner(), &request)
        .await
}

pub async fn get_payment(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_payment(id.0, &request).await
}

pub async fn fee_summary(
    request: HttpRequest,
    query: web::Query<FeeSummaryParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.fee_summary(query.into_inner(), &request).await
}

/// Admin and staff run the bursary. Students and parents read their own
/// invoices and may pay them through a gateway; the service checks ownership.
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/structures")
                    .route(web::get().to(list_fee_structures))
                    .route(web::post().to(create_fee_structure).wrap(bursary())),
            )
            .service(
                web::resource("/structures/{id}")
                    .route(web::get().to(get_fee_structure))
                    .route(web::put().to(update_fee_structure).wrap(bursary()))
                    .route(web::delete().to(delete_fee_structure).wrap(bursary())),
            )
            .service(
                web::resource("/invoices")
                    .route(web::get().to(list_invoices))
                    .route(web::post().to(create_invoice).wrap(bursary())),
            )
            .service(
                web::resource("/invoices/generate")
                    .route(web::post().to(generate_invoices).wrap(bursary())),
            )
            .service(
                web::resource("/invoices/{id}")
                    .route(web::get().to(get_invoice))
                    .route(
                        web::delete()
                            .to(delete_invoice)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/invoices/{id}/cancel")
                    .route(web::post().to(cancel_invoice).wrap(bursary())),
            )
            .service(
                web::resource("/invoices/{id}/payments")
                    .route(web::get().to(list_payments))
                    .route(web::post().to(record_payment).wrap(bursary())),
            )
            .service(
                web::resource("/invoices/{id}/pay/{gateway}")
                    .route(web::post().to(pay_with_gateway)),
            )
            .service(web::resource("/payments/{id}").route(web::get().to(get_payment)))
            .service(
                web::resource("/summary").route(web::get().to(fee_summary).wrap(bursary())),
            ),
    );
}

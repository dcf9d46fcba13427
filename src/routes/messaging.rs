use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messaging::requests::{
    CreateThreadRequest, MessageListParams, SendMessageRequest, ThreadListParams,
};
use crate::services::MessagingService;
use crate::utils::SafeIDI64;

// Lazily initialised global MessagingService
static MESSAGING_SERVICE: Lazy<MessagingService> = Lazy::new(MessagingService::new_lazy);

pub async fn list_threads(
    request: HttpRequest,
    query: web::Query<ThreadListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGING_SERVICE
        .list_threads(query.into_inner(), &request)
        .await
}

pub async fn create_thread(
    request: HttpRequest,
    body: web::Json<CreateThreadRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGING_SERVICE
        .create_thread(body.into_inner(), &request)
        .await
}

pub async fn list_messages(
    request: HttpRequest,
    id: SafeIDI64,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGING_SERVICE
        .list_messages(id.0, query.into_inner(), &request)
        .await
}

pub async fn send_message(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGING_SERVICE
        .send_message(id.0, body.into_inner(), &request)
        .await
}

pub async fn mark_read(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGING_SERVICE.mark_read(id.0, &request).await
}

pub fn configure_messaging_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/threads")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_threads))
                    .route(web::post().to(create_thread)),
            )
            .service(
                web::resource("/{id}/messages")
                    .route(web::get().to(list_messages))
                    .route(web::post().to(send_message)),
            )
            .service(web::resource("/{id}/read").route(web::post().to(mark_read))),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::responses::HealthResponse};

pub async fn health(_service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| start.start_datetime)
        .unwrap_or(now);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "ok".to_string(),
            uptime_seconds: (now - started_at).num_seconds(),
            started_at,
        },
        "Service is healthy",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::{ApiResponse, system::responses::SystemInfoResponse};

pub async fn info(service: &SystemService, _request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let response = SystemInfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        school_name: config.app.school_name.clone(),
        environment: config.app.environment.clone(),
        currency: config.app.currency.clone(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System information retrieved successfully",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

// Lazily initialised global DashboardService
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn stats(request: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.stats(&request).await
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/stats", web::get().to(stats)),
    );
}

//! Headline figures for the staff dashboard, cached for a short while.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::dashboard::DashboardStats;
use crate::services::{respond_on_err, stored};

pub const STATS_CACHE_KEY: &str = "dashboard:stats";

crate::services::lazy_service!(DashboardService);

impl DashboardService {
    pub async fn stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let cache = request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|c| c.get_ref().clone());

        if let Some(cache) = &cache
            && let CacheResult::Found(stats) = cache.get::<DashboardStats>(STATS_CACHE_KEY).await
        {
            debug!("Dashboard stats served from cache");
            return Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Dashboard stats")));
        }

        let storage = self.get_storage(request);
        let stats = respond_on_err!(stored(
            storage.dashboard_stats(Utc::now().date_naive()).await
        ));
        if let Some(cache) = &cache {
            cache
                .insert(
                    STATS_CACHE_KEY.to_string(),
                    &stats,
                    AppConfig::get().cache.dashboard_ttl,
                )
                .await;
        }
        Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Dashboard stats")))
    }
}

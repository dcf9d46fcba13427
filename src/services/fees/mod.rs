pub mod invoices;
pub mod ledger;
pub mod payments;
pub mod structures;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::fees::requests::FeeSummaryParams;
use crate::services::{respond_on_err, stored};

crate::services::lazy_service!(FeeService);

impl FeeService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// Invoiced, collected and outstanding totals, optionally for one term.
    pub async fn fee_summary(
        &self,
        query: FeeSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let summary = respond_on_err!(stored(storage.fee_summary(query.term_id).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Fee summary retrieved")))
    }
}

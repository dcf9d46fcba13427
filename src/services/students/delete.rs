use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

/// Soft delete: the student is marked withdrawn and hidden from lists.
pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.soft_delete_student(id).await {
        Ok(true) => {
            info!("Withdrew student {}", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

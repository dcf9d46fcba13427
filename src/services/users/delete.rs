use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, not_found};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        ));
    }

    let storage = service.get_storage(request);

    match storage.delete_user(user_id).await {
        Ok(true) => {
            info!("Deleted user {}", user_id);
            service.invalidate_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

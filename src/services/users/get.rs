use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{found, respond_on_err};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = respond_on_err!(found(
        storage.get_user_by_id(user_id).await,
        ErrorCode::UserNotFound,
        "User not found",
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "User information retrieved successfully",
    )))
}

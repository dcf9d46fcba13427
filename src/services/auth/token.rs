use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, respond_on_err};
use crate::utils::jwt;

fn login_again(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

/// Issues a new access token for the user named by the refresh cookie,
/// provided that user still exists and is active.
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(login_again("Login expired or invalid, please login again"));
        }
    };

    let Ok(user_id) = claims.sub.parse::<i64>() else {
        return Ok(login_again("Login expired or invalid, please login again"));
    };

    let storage = service.get_storage(request);
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => return Ok(login_again("Account is no longer active")),
        Err(e) => return Ok(crate::services::error_response(&e)),
    };

    match jwt::JwtUtils::generate_access_token(user.id, user.role.as_str()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Unable to refresh token",
            )))
        }
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved successfully",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::users::entities::UserStatus;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::{error_response, reject};
use crate::utils::jwt;
use crate::utils::password::verify_password;

fn invalid_credentials() -> HttpResponse {
    reject(
        actix_web::http::StatusCode::UNAUTHORIZED,
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    )
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => return Ok(error_response(&e)),
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }

    if user.status != UserStatus::Active {
        return Ok(reject(
            actix_web::http::StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            format!("Account is {}", user.status),
        ));
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        error!("Failed to update last login for user {}: {}", user.id, e);
    }

    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Login failed, unable to generate token",
            )));
        }
    };

    info!("User {} logged in", user.username);

    let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

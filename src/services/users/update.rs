use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{bad_request, error_response, found, reject, respond_on_err};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = &update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    if let Some(password) = &update_data.password {
        if let Err(msg) = validate_password(password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match hash_password(password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => return Ok(error_response(&e)),
        }
    }

    let storage = service.get_storage(request);

    let result = match storage.update_user(user_id, update_data).await {
        Err(SchoolError::Conflict(_)) => {
            return Ok(reject(
                actix_web::http::StatusCode::CONFLICT,
                ErrorCode::UserAlreadyExists,
                "Email already in use",
            ));
        }
        other => other,
    };
    let user = respond_on_err!(found(result, ErrorCode::UserNotFound, "User not found"));

    service.invalidate_cached_users(request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "User information updated successfully",
    )))
}

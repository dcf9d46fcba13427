use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::{bad_request, error_response, reject};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password, validate_required, validate_username,
};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }

    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    if let Err(msg) = validate_password(&user_data.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    for (field, value) in [
        ("first_name", &user_data.first_name),
        ("last_name", &user_data.last_name),
    ] {
        if let Err(msg) = validate_required(field, value) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e)),
    };

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Created {} account '{}'", user.role, user.username);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(UserResponse { user }, "User created successfully")))
        }
        Err(SchoolError::Conflict(_)) => Ok(reject(
            actix_web::http::StatusCode::CONFLICT,
            ErrorCode::UserAlreadyExists,
            "Username or email already exists",
        )),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Declares a service that resolves its storage from the app data on
/// first use, so it can live in a `Lazy` static next to its routes.
macro_rules! lazy_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}
pub(crate) use lazy_service;

/// Unwraps `Ok`, or returns the prepared error response from the handler.
macro_rules! respond_on_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}
pub(crate) use respond_on_err;

pub mod academics;
pub mod admissions;
pub mod assessments;
pub mod attendance;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod fees;
pub mod grades;
pub mod hr;
pub mod inventory;
pub mod messaging;
pub mod parents;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;

pub use academics::AcademicsService;
pub use admissions::AdmissionService;
pub use assessments::AssessmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use blog::BlogService;
pub use dashboard::DashboardService;
pub use fees::FeeService;
pub use grades::GradeService;
pub use hr::HrService;
pub use inventory::InventoryService;
pub use messaging::MessagingService;
pub use parents::ParentService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::{Result, SchoolError};
use crate::middlewares::RequireJWT;
use crate::models::students::entities::Student;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// Envelope response for an error raised by storage or a business rule.
pub(crate) fn error_response(err: &SchoolError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(ErrorCode::from(err), err.message()))
}

/// Envelope response with an explicit status and domain code.
pub(crate) fn reject(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, code, message)
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::FORBIDDEN, ErrorCode::Forbidden, message)
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::NOT_FOUND, code, message)
}

/// The user loaded by [`RequireJWT`].
pub(crate) fn current_user(request: &HttpRequest) -> std::result::Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )
    })
}

/// Turns a lookup into its value, a 404 or a storage error response.
pub(crate) fn found<T>(
    result: Result<Option<T>>,
    code: ErrorCode,
    message: &str,
) -> std::result::Result<T, HttpResponse> {
    match result {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(not_found(code, message)),
        Err(e) => Err(error_response(&e)),
    }
}

/// Storage result or the matching error response.
pub(crate) fn stored<T>(result: Result<T>) -> std::result::Result<T, HttpResponse> {
    result.map_err(|e| error_response(&e))
}

/// Loads the account a profile is created for and checks its role.
pub(crate) async fn profile_user(
    storage: &dyn Storage,
    user_id: i64,
    role: UserRole,
) -> std::result::Result<User, HttpResponse> {
    let user = found(
        storage.get_user_by_id(user_id).await,
        ErrorCode::UserNotFound,
        "User not found",
    )?;
    if user.role != role {
        return Err(bad_request(
            ErrorCode::ProfileRoleMismatch,
            format!("User must have the {role} role"),
        ));
    }
    Ok(user)
}

/// Whether `user` may read records that belong to `student`.
///
/// Staff see every student, a student only themself and a parent only
/// linked children.
pub(crate) async fn can_access_student(
    storage: &dyn Storage,
    user: &User,
    student: &Student,
) -> Result<bool> {
    if user.role.is_staff_member() {
        return Ok(true);
    }
    match user.role {
        UserRole::Student => Ok(student.user_id == user.id),
        UserRole::Parent => match storage.get_parent_by_user_id(user.id).await? {
            Some(parent) => storage.is_parent_of(parent.id, student.id).await,
            None => Ok(false),
        },
        _ => Ok(false),
    }
}

/// Loads a student and checks that the caller may see it.
pub(crate) async fn accessible_student(
    storage: &dyn Storage,
    user: &User,
    student_id: i64,
) -> std::result::Result<Student, HttpResponse> {
    let student = found(
        storage.get_student(student_id).await,
        ErrorCode::StudentNotFound,
        "Student not found",
    )?;
    match can_access_student(storage, user, &student).await {
        Ok(true) => Ok(student),
        Ok(false) => Err(forbidden("You do not have access to this student")),
        Err(e) => Err(error_response(&e)),
    }
}

/// Access check for records that point at a student, such as invoices.
///
/// Staff skip the student lookup, so records of a soft-deleted student stay
/// reachable for them. Everyone else goes through [`accessible_student`].
pub(crate) async fn check_student_records(
    storage: &dyn Storage,
    user: &User,
    student_id: i64,
) -> std::result::Result<(), HttpResponse> {
    if user.role.is_staff_member() {
        return Ok(());
    }
    accessible_student(storage, user, student_id).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_error_response_uses_error_status_and_code() {
        let response = error_response(&SchoolError::conflict("Admission number already exists"));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["code"], ErrorCode::Conflict as i32);
        assert_eq!(json["message"], "Admission number already exists");
    }

    #[test]
    fn test_found_maps_missing_rows_to_404() {
        let missing: Result<Option<i64>> = Ok(None);
        let response = found(missing, ErrorCode::PostNotFound, "Post not found").expect_err("404");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let failed: Result<Option<i64>> = Err(SchoolError::database_operation("down"));
        let response = found(failed, ErrorCode::PostNotFound, "Post not found").expect_err("500");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(found(Ok(Some(3)), ErrorCode::NotFound, "x").ok(), Some(3));
    }
}

//! Unified error type.
//!
//! Variants are generated by a macro so that every error carries a stable
//! code and a human readable type name next to its message.

use std::fmt;

use actix_web::http::StatusCode;
use sea_orm::{DbErr, SqlErr};

/// Generates the error enum together with:
/// - `code()` stable error code
/// - `error_type()` type name
/// - `message()` detail
/// - snake_case constructors
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Conflict"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl SchoolError {
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// HTTP status the error maps to when it reaches a handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => StatusCode::BAD_REQUEST,
            SchoolError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SchoolError::Authorization(_) => StatusCode::FORBIDDEN,
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return SchoolError::Conflict(detail);
        }
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::database_config("test").code(), "E002");
        assert_eq!(SchoolError::validation("test").code(), "E005");
        assert_eq!(SchoolError::conflict("test").code(), "E007");
        assert_eq!(SchoolError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::not_found("student").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SchoolError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SchoolError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            SchoolError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(SchoolError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            SchoolError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Score exceeds max score");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Score exceeds max score"));
    }

    #[test]
    fn test_db_err_maps_to_database_operation() {
        let err: SchoolError = DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E004");
    }
}

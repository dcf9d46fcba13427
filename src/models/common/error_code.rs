use crate::errors::SchoolError;

/// Numeric codes carried in the `code` field of every response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // General
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // Auth
    AuthFailed = 1100,

    // Users
    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    CanNotDeleteCurrentUser = 2005,

    // Academics
    TermDateInvalid = 2500,
    NoCurrentTerm = 2501,

    // Students, teachers, parents
    StudentNotFound = 3000,
    ProfileRoleMismatch = 3001,
    ParentLinkNotFound = 3002,

    // Assessments and grades
    ScoreOutOfRange = 4000,
    AssessmentInvalid = 4001,

    // Attendance
    AttendanceInvalid = 5000,

    // Fees
    InvoiceInvalid = 6000,
    PaymentRejected = 6001,
    GatewayUnknown = 6002,

    // Messaging
    ThreadAccessDenied = 7000,
    MessageInvalid = 7001,

    // Blog
    PostNotFound = 8000,

    // Inventory
    StockInsufficient = 9000,

    // HR
    LeaveInvalid = 10000,

    // Admissions
    ApplicationNotFound = 11000,
    ApplicationInvalid = 11001,
}

impl From<&SchoolError> for ErrorCode {
    fn from(err: &SchoolError) -> Self {
        match err {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::BadRequest,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) => ErrorCode::Forbidden,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}

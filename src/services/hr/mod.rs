pub mod employees;
pub mod leave;

crate::services::lazy_service!(HrService);

pub mod applications;
pub mod enrollment;

crate::services::lazy_service!(AdmissionService);

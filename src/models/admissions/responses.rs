use serde::Serialize;
use ts_rs::TS;

use super::entities::{Application, Enrollment};
use crate::models::students::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct ApplicationDetail {
    pub application: Application,
    pub enrollment: Option<Enrollment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct EnrollmentResponse {
    pub application: Application,
    pub enrollment: Enrollment,
    pub student: Student,
}

use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::ApplicationStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};
use crate::models::students::entities::Gender;

/// Submitted from the public admissions page; no account is needed.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct SubmitApplicationRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub grade_level_id: i64,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub address: Option<String>,
    pub previous_school: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct ApplicationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade_level_id: Option<i64>,
    /// Matches applicant or guardian name.
    pub search: Option<String>,
}

/// Storage-level application filter.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub grade_level_id: Option<i64>,
    pub search: Option<String>,
}

/// Turns an approved application into a student profile for an existing
/// student account.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct EnrollApplicationRequest {
    pub user_id: i64,
    pub admission_number: String,
    pub classroom_id: Option<i64>,
    /// Defaults to today.
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_boarder: bool,
}

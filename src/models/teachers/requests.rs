use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, deserialize_optional_bool};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    /// Matches employee number, first name or last name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct CreateTeacherRequest {
    pub user_id: i64,
    pub employee_number: String,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct UpdateTeacherRequest {
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

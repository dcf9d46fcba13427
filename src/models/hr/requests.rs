use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EmploymentStatus, LeaveStatus};
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct EmployeeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub search: Option<String>,
}

/// Storage-level employee filter.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct CreateEmployeeRequest {
    pub employee_number: String,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    pub salary_cents: Option<i64>,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary_cents: Option<i64>,
    pub status: Option<EmploymentStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct CreateLeaveRequest {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct LeaveListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub employee_id: Option<i64>,
    pub status: Option<LeaveStatus>,
}

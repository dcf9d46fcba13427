use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkAttendanceRequest {
    pub classroom_id: i64,
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub classroom_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummaryQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub classroom_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Storage-level attendance filter.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub classroom_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

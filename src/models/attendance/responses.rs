use serde::Serialize;
use ts_rs::TS;

use super::entities::AttendanceRecord;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkAttendanceResponse {
    pub created: i64,
    pub updated: i64,
    pub records: Vec<AttendanceRecord>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "attendance.ts")]
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub classroom_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw per-status counts as read from storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
}

impl AttendanceCounts {
    pub fn add(&mut self, status: AttendanceStatus, count: i64) {
        match status {
            AttendanceStatus::Present => self.present += count,
            AttendanceStatus::Absent => self.absent += count,
            AttendanceStatus::Late => self.late += count,
            AttendanceStatus::Excused => self.excused += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.present + self.absent + self.late + self.excused
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    /// `present / total * 100`, one decimal place.
    pub attendance_percentage: f64,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

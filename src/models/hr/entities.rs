use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "hr.ts")]
    pub enum EmploymentStatus {
        Active => "active",
        OnLeave => "on_leave",
        Terminated => "terminated",
    }
}

string_enum! {
    #[ts(export, export_to = "hr.ts")]
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct Employee {
    pub id: i64,
    pub employee_number: String,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    pub salary_cents: Option<i64>,
    pub hire_date: NaiveDate,
    pub status: EmploymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "hr.ts")]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive calendar days.
    pub days: i64,
    pub reason: String,
    pub status: LeaveStatus,
    pub decided_by: Option<i64>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

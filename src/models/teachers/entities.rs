use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

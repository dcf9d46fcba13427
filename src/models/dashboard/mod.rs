use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::fees::entities::StatusCount;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardStats {
    pub total_students: i64,
    pub active_students: i64,
    pub total_teachers: i64,
    pub active_teachers: i64,
    pub total_parents: i64,
    pub total_classrooms: i64,
    pub invoices_by_status: Vec<StatusCount>,
    pub invoiced_cents: i64,
    pub collected_cents: i64,
    pub outstanding_cents: i64,
    pub attendance_marked_today: i64,
    pub attendance_rate_today: f64,
    pub low_stock_items: i64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

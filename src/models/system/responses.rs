use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub name: String,
    pub version: String,
    pub school_name: String,
    pub environment: String,
    pub currency: String,
}

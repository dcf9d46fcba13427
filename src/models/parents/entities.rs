use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "parent.ts")]
    pub enum ParentRelationship {
        Father => "father",
        Mother => "mother",
        Guardian => "guardian",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "parent.ts")]
pub struct Parent {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub relationship: ParentRelationship,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub is_primary_contact: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

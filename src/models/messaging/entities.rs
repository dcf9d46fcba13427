use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "messaging.ts")]
    pub enum ThreadKind {
        Direct => "direct",
        Group => "group",
        Announcement => "announcement",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub kind: ThreadKind,
    pub created_by: i64,
    pub participant_ids: Vec<i64>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Thread as seen by one participant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct ThreadSummary {
    pub thread: Thread,
    pub unread_count: i64,
    pub last_read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct Message {
    pub id: i64,
    pub thread_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

use serde::Deserialize;
use ts_rs::TS;

use super::entities::ThreadKind;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct CreateThreadRequest {
    pub title: String,
    #[serde(default = "default_kind")]
    pub kind: ThreadKind,
    pub participant_ids: Vec<i64>,
    /// Optional first message.
    pub message: Option<String>,
}

fn default_kind() -> ThreadKind {
    ThreadKind::Direct
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct ThreadListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "messaging.ts")]
pub struct MessageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

use serde::Deserialize;
use ts_rs::TS;

use super::entities::ParentRelationship;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "parent.ts")]
pub struct ParentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// Matches first name, last name or phone.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "parent.ts")]
pub struct CreateParentRequest {
    pub user_id: i64,
    pub relationship: ParentRelationship,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    #[serde(default)]
    pub is_primary_contact: bool,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "parent.ts")]
pub struct UpdateParentRequest {
    pub relationship: Option<ParentRelationship>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub is_primary_contact: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "parent.ts")]
pub struct LinkStudentRequest {
    pub student_id: i64,
}

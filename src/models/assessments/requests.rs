use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssessmentKind;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub classroom_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateAssessmentRequest {
    pub name: String,
    pub kind: AssessmentKind,
    pub term_id: i64,
    pub subject_id: i64,
    pub classroom_id: Option<i64>,
    pub max_score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub held_on: Option<NaiveDate>,
    pub description: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub name: Option<String>,
    pub kind: Option<AssessmentKind>,
    pub classroom_id: Option<i64>,
    pub max_score: Option<f64>,
    pub weight: Option<f64>,
    pub held_on: Option<NaiveDate>,
    pub description: Option<String>,
}

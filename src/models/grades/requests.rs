use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub assessment_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub assessment_id: i64,
    pub score: f64,
    pub comments: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub score: Option<f64>,
    pub comments: Option<String>,
}

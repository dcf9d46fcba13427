use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct GradeLevelListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateGradeLevelRequest {
    pub name: String,
    pub level: i32,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct UpdateGradeLevelRequest {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct ClassroomListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade_level_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateClassroomRequest {
    pub code: String,
    pub name: String,
    pub grade_level_id: Option<i64>,
    pub class_teacher_id: Option<i64>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
}

fn default_capacity() -> i32 {
    40
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    pub grade_level_id: Option<i64>,
    pub class_teacher_id: Option<i64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct TermListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateTermRequest {
    pub name: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct UpdateTermRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_credit_hours")]
    pub credit_hours: i32,
}

fn default_credit_hours() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub credit_hours: Option<i32>,
}

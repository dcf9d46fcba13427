use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AcademicStatus, Gender};
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade_level_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub classroom_id: Option<i64>,
    pub academic_status: Option<AcademicStatus>,
    /// Matches admission number, first name or last name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub user_id: i64,
    pub admission_number: String,
    pub grade_level_id: i64,
    pub classroom_id: Option<i64>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    /// Defaults to today.
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_boarder: bool,
    pub medical_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub grade_level_id: Option<i64>,
    pub classroom_id: Option<i64>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub academic_status: Option<AcademicStatus>,
    pub is_boarder: Option<bool>,
    pub medical_notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ReportCardParams {
    pub term_id: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct AttendanceSummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Storage-level student filter.
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: i64,
    pub size: i64,
    pub grade_level_id: Option<i64>,
    pub classroom_id: Option<i64>,
    pub academic_status: Option<AcademicStatus>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: params.pagination.page(),
            size: params.pagination.size(),
            grade_level_id: params.grade_level_id,
            classroom_id: params.classroom_id,
            academic_status: params.academic_status,
            search: params.search,
        }
    }
}

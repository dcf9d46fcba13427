use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "student.ts")]
    pub enum AcademicStatus {
        Active => "active",
        Suspended => "suspended",
        Graduated => "graduated",
        Transferred => "transferred",
        Withdrawn => "withdrawn",
    }
}

string_enum! {
    #[ts(export, export_to = "student.ts")]
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

/// Student profile joined with the owning user's name and email.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade_level_id: i64,
    pub classroom_id: Option<i64>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_date: NaiveDate,
    pub academic_status: AcademicStatus,
    pub is_boarder: bool,
    pub medical_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

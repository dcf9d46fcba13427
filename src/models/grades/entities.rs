use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academics::entities::Term;
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::students::entities::Student;

string_enum! {
    #[ts(export, export_to = "grade.ts")]
    pub enum LetterGrade {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        F => "F",
    }
}

/// A recorded score together with its derived percentage and letter.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub assessment_id: i64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub letter_grade: LetterGrade,
    pub comments: Option<String>,
    pub graded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One graded assessment of a student in a term, with its subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub subject_id: i64,
    pub subject_code: String,
    pub subject_name: String,
    pub credit_hours: i32,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct SubjectReport {
    pub subject_id: i64,
    pub subject_code: String,
    pub subject_name: String,
    pub credit_hours: i32,
    pub graded_assessments: i64,
    /// `None` when every graded assessment carries zero weight.
    pub percentage: Option<f64>,
    pub letter_grade: Option<LetterGrade>,
    pub grade_point: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct ReportCard {
    pub student: Student,
    pub term: Term,
    pub subjects: Vec<SubjectReport>,
    pub gpa: Option<f64>,
    pub overall_percentage: Option<f64>,
    pub overall_letter_grade: Option<LetterGrade>,
    pub attendance: AttendanceSummary,
}

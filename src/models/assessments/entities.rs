use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "assessment.ts")]
    pub enum AssessmentKind {
        Exam => "exam",
        Quiz => "quiz",
        Assignment => "assignment",
        Project => "project",
        Practical => "practical",
        ContinuousAssessment => "continuous_assessment",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub name: String,
    pub kind: AssessmentKind,
    pub term_id: i64,
    pub subject_id: i64,
    pub classroom_id: Option<i64>,
    pub max_score: f64,
    /// Relative weight inside the subject's term grade. Zero excludes it.
    pub weight: f64,
    pub held_on: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

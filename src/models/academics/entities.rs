use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct GradeLevel {
    pub id: i64,
    pub name: String,
    /// Ordering key, e.g. 1 for Form 1.
    pub level: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Classroom {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub grade_level_id: Option<i64>,
    pub class_teacher_id: Option<i64>,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Term {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Term {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credit_hours: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

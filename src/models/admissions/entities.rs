use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::students::entities::Gender;

string_enum! {
    #[ts(export, export_to = "admissions.ts")]
    pub enum ApplicationStatus {
        New => "new",
        Review => "review",
        Approved => "approved",
        Rejected => "rejected",
        Enrolled => "enrolled",
    }
}

impl ApplicationStatus {
    /// Statuses an application may move to from `self`.
    ///
    /// Review is optional; a new application can be decided directly.
    /// Rejected and enrolled applications are final.
    pub fn next(&self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;
        match self {
            New => &[Review, Approved, Rejected],
            Review => &[Approved, Rejected],
            Approved => &[Enrolled],
            Rejected | Enrolled => &[],
        }
    }

    pub fn can_move_to(&self, target: ApplicationStatus) -> bool {
        self.next().contains(&target)
    }

    /// Statuses from which `target` is reachable in one step.
    pub fn sources_of(target: ApplicationStatus) -> Vec<ApplicationStatus> {
        ApplicationStatus::ALL
            .iter()
            .copied()
            .filter(|status| status.can_move_to(target))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct Application {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub grade_level_id: i64,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub address: Option<String>,
    pub previous_school: Option<String>,
    pub notes: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Links an enrolled application to the student profile it produced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "admissions.ts")]
pub struct Enrollment {
    pub id: i64,
    pub application_id: i64,
    /// Cleared if the student profile is later removed.
    pub student_id: Option<i64>,
    pub admission_number: String,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flow() {
        use ApplicationStatus::*;
        assert!(New.can_move_to(Review));
        assert!(New.can_move_to(Approved));
        assert!(Review.can_move_to(Rejected));
        assert!(Approved.can_move_to(Enrolled));
        assert!(!New.can_move_to(Enrolled));
        assert!(!Review.can_move_to(Review));
        assert!(!Rejected.can_move_to(Approved));
        assert!(Enrolled.next().is_empty());
    }

    #[test]
    fn test_sources_of_decision() {
        use ApplicationStatus::*;
        assert_eq!(ApplicationStatus::sources_of(Approved), vec![New, Review]);
        assert_eq!(ApplicationStatus::sources_of(Enrolled), vec![Approved]);
        assert_eq!(ApplicationStatus::sources_of(Review), vec![New]);
    }
}

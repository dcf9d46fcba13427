//! SeaORM entities.
//!
//! Storage works on these table models and converts them into the business
//! types under `crate::models` before returning.

use chrono::{DateTime, Utc};

pub mod prelude;

pub mod applications;
pub mod assessments;
pub mod attendance_records;
pub mod blog_posts;
pub mod classrooms;
pub mod employees;
pub mod enrollments;
pub mod fee_structures;
pub mod grade_levels;
pub mod grades;
pub mod inventory_items;
pub mod inventory_transactions;
pub mod invoice_lines;
pub mod invoices;
pub mod leave_requests;
pub mod messages;
pub mod parent_students;
pub mod parents;
pub mod payments;
pub mod student_profiles;
pub mod subjects;
pub mod teacher_profiles;
pub mod terms;
pub mod thread_participants;
pub mod threads;
pub mod users;

/// Unix seconds to UTC, falling back to the epoch on out-of-range values.
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

use chrono::NaiveDate;

use crate::models::attendance::entities::{AttendanceCounts, AttendanceSummary};

/// `present / total * 100` to one decimal. Late and excused are not present.
pub fn attendance_percentage(counts: &AttendanceCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 0.0;
    }
    let pct = counts.present as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

pub fn summarize(
    counts: AttendanceCounts,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AttendanceSummary {
    AttendanceSummary {
        total: counts.total(),
        present: counts.present,
        absent: counts.absent,
        late: counts.late,
        excused: counts.excused,
        attendance_percentage: attendance_percentage(&counts),
        from,
        to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(present: i64, absent: i64, late: i64, excused: i64) -> AttendanceCounts {
        AttendanceCounts {
            present,
            absent,
            late,
            excused,
        }
    }

    #[test]
    fn test_empty_range_is_zero() {
        assert_eq!(attendance_percentage(&AttendanceCounts::default()), 0.0);
    }

    #[test]
    fn test_late_and_excused_are_not_present() {
        assert_eq!(attendance_percentage(&counts(2, 0, 1, 1)), 50.0);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        assert_eq!(attendance_percentage(&counts(2, 1, 0, 0)), 66.7);
        assert_eq!(attendance_percentage(&counts(1, 2, 0, 0)), 33.3);
        assert_eq!(attendance_percentage(&counts(5, 0, 0, 0)), 100.0);
    }

    #[test]
    fn test_summary_totals() {
        let summary = summarize(counts(18, 1, 1, 0), None, None);
        assert_eq!(summary.total, 20);
        assert_eq!(summary.present, 18);
        assert_eq!(summary.attendance_percentage, 90.0);
    }
}

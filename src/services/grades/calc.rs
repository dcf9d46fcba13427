//! Grading arithmetic: assessment percentage, letter grade, grade points,
//! weighted subject percentage and the credit-weighted term GPA.

use std::collections::BTreeMap;

use crate::models::grades::entities::{LetterGrade, ReportEntry, SubjectReport};

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `score / max_score * 100`, 0 when the maximum is not positive.
pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    score / max_score * 100.0
}

pub fn letter_grade(percentage: f64) -> LetterGrade {
    match percentage {
        p if p >= 80.0 => LetterGrade::A,
        p if p >= 70.0 => LetterGrade::B,
        p if p >= 60.0 => LetterGrade::C,
        p if p >= 50.0 => LetterGrade::D,
        _ => LetterGrade::F,
    }
}

pub fn grade_point(letter: LetterGrade) -> f64 {
    match letter {
        LetterGrade::A => 4.0,
        LetterGrade::B => 3.0,
        LetterGrade::C => 2.0,
        LetterGrade::D => 1.0,
        LetterGrade::F => 0.0,
    }
}

/// Weighted percentage over one subject's grades.
///
/// Zero-weight assessments do not count; `None` when no weight remains.
pub fn weighted_percentage(entries: &[&ReportEntry]) -> Option<f64> {
    let (weighted, total_weight) = entries
        .iter()
        .filter(|e| e.weight > 0.0)
        .fold((0.0, 0.0), |(sum, weights), e| {
            (
                sum + e.score / e.max_score.max(f64::EPSILON) * e.weight,
                weights + e.weight,
            )
        });
    if total_weight <= 0.0 {
        return None;
    }
    Some(weighted / total_weight * 100.0)
}

/// One row per subject, ordered by subject code.
pub fn subject_reports(entries: &[ReportEntry]) -> Vec<SubjectReport> {
    let mut by_subject: BTreeMap<(&str, i64), Vec<&ReportEntry>> = BTreeMap::new();
    for entry in entries {
        by_subject
            .entry((entry.subject_code.as_str(), entry.subject_id))
            .or_default()
            .push(entry);
    }

    by_subject
        .into_values()
        .map(|rows| {
            let first = rows[0];
            // The letter follows the percentage as displayed.
            let pct = weighted_percentage(&rows).map(round2);
            let letter = pct.map(letter_grade);
            SubjectReport {
                subject_id: first.subject_id,
                subject_code: first.subject_code.clone(),
                subject_name: first.subject_name.clone(),
                credit_hours: first.credit_hours,
                graded_assessments: rows.len() as i64,
                percentage: pct,
                letter_grade: letter,
                grade_point: letter.map(grade_point),
            }
        })
        .collect()
}

/// Credit-weighted mean of `value` over subjects that have a percentage.
fn credit_weighted(subjects: &[SubjectReport], value: impl Fn(&SubjectReport) -> f64) -> Option<f64> {
    let (sum, credits) = subjects
        .iter()
        .filter(|s| s.percentage.is_some() && s.credit_hours > 0)
        .fold((0.0, 0.0), |(sum, credits), s| {
            let hours = f64::from(s.credit_hours);
            (sum + value(s) * hours, credits + hours)
        });
    if credits <= 0.0 {
        return None;
    }
    Some(round2(sum / credits))
}

pub fn gpa(subjects: &[SubjectReport]) -> Option<f64> {
    credit_weighted(subjects, |s| s.grade_point.unwrap_or_default())
}

pub fn overall_percentage(subjects: &[SubjectReport]) -> Option<f64> {
    credit_weighted(subjects, |s| s.percentage.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(subject_id: i64, code: &str, credits: i32, score: f64, max: f64, weight: f64) -> ReportEntry {
        ReportEntry {
            subject_id,
            subject_code: code.to_string(),
            subject_name: code.to_string(),
            credit_hours: credits,
            score,
            max_score: max,
            weight,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(10.0, 0.0), 0.0);
        assert_eq!(round2(200.0 / 3.0), 66.67);
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(letter_grade(80.0), LetterGrade::A);
        assert_eq!(letter_grade(79.99), LetterGrade::B);
        assert_eq!(letter_grade(70.0), LetterGrade::B);
        assert_eq!(letter_grade(60.0), LetterGrade::C);
        assert_eq!(letter_grade(50.0), LetterGrade::D);
        assert_eq!(letter_grade(49.9), LetterGrade::F);
        assert_eq!(grade_point(LetterGrade::A), 4.0);
        assert_eq!(grade_point(LetterGrade::F), 0.0);
    }

    #[test]
    fn test_weighted_subject_percentage() {
        // Exam 60/100 weight 3, quiz 9/10 weight 1 -> (0.6*3 + 0.9*1) / 4 = 67.5%
        let exam = entry(1, "MATH", 4, 60.0, 100.0, 3.0);
        let quiz = entry(1, "MATH", 4, 9.0, 10.0, 1.0);
        let practice = entry(1, "MATH", 4, 0.0, 10.0, 0.0);
        assert_eq!(
            weighted_percentage(&[&exam, &quiz, &practice]),
            Some(67.5)
        );
        assert_eq!(weighted_percentage(&[&practice]), None);
    }

    #[test]
    fn test_gpa_weights_by_credit_hours() {
        let entries = vec![
            entry(1, "MATH", 4, 85.0, 100.0, 1.0), // A, 4 points
            entry(2, "ENG", 2, 65.0, 100.0, 1.0),  // C, 2 points
            entry(3, "ART", 3, 5.0, 10.0, 0.0),    // no weight, left out
        ];
        let subjects = subject_reports(&entries);
        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects[0].subject_code, "ART");
        assert_eq!(subjects[0].percentage, None);
        assert_eq!(subjects[0].grade_point, None);

        // (4*4 + 2*2) / 6 = 3.33
        assert_eq!(gpa(&subjects), Some(3.33));
        // (85*4 + 65*2) / 6 = 78.33
        assert_eq!(overall_percentage(&subjects), Some(78.33));
    }

    #[test]
    fn test_letter_matches_displayed_percentage() {
        // 79.996% is shown as 80.0, so it earns the A.
        let entries = vec![entry(1, "BIO", 3, 79.996, 100.0, 1.0)];
        let subjects = subject_reports(&entries);
        assert_eq!(subjects[0].percentage, Some(80.0));
        assert_eq!(subjects[0].letter_grade, Some(LetterGrade::A));
        assert_eq!(subjects[0].grade_point, Some(4.0));
    }

    #[test]
    fn test_no_graded_subjects_has_no_gpa() {
        assert_eq!(gpa(&[]), None);
        assert_eq!(overall_percentage(&[]), None);
    }
}

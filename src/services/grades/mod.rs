pub mod calc;
pub mod record;
pub mod view;

crate::services::lazy_service!(GradeService);

/// `0 <= score <= max_score`.
pub(crate) fn check_score(score: f64, max_score: f64) -> Result<(), String> {
    if !score.is_finite() || score < 0.0 {
        return Err("Score must not be negative".to_string());
    }
    if score > max_score {
        return Err(format!("Score {score} exceeds the maximum of {max_score}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_score;

    #[test]
    fn test_score_range() {
        assert!(check_score(0.0, 50.0).is_ok());
        assert!(check_score(50.0, 50.0).is_ok());
        assert!(check_score(50.5, 50.0).is_err());
        assert!(check_score(-1.0, 50.0).is_err());
    }
}

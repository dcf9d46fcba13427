use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{5,16}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "qwerty123",
    "admin1234",
    "abcd1234",
    "welcome1",
    "letmein1",
    "school123",
];

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err("Username must be 5 to 16 letters, digits, underscores or hyphens")
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err("Email format is invalid")
    }
}

/// At least 8 characters mixing upper case, lower case and digits, and not
/// a well-known password. Every failed rule is reported, joined by `; `.
pub fn validate_password(password: &str) -> Result<(), String> {
    let rules: [(bool, &str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain an uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain a lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain a digit",
        ),
    ];

    let mut failures: Vec<&str> = rules
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, message)| *message)
        .collect();
    if COMMON_PASSWORDS
        .iter()
        .any(|common| password.eq_ignore_ascii_case(common))
    {
        failures.push("Password is too common");
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("; "))
    }
}

/// Rejects empty or whitespace-only text fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("jdoe_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("this-name-is-way-too-long").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("bursar@regisbridge.ac.zw").is_ok());
        assert!(validate_email("no-at-sign.example").is_err());
    }

    #[test]
    fn test_required_field() {
        assert!(validate_required("title", "Sports day").is_ok());
        assert!(validate_required("title", "   ").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Harare2026").is_ok());
        assert!(validate_password("School123").is_err());

        let message = validate_password("abc").expect_err("weak");
        assert!(message.contains("at least 8 characters"));
        assert!(message.contains("uppercase"));
        assert!(message.contains("digit"));
        assert!(!message.contains("lowercase"));
    }
}

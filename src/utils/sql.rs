use sea_orm::sea_query::LikeExpr;

/// Escapes `%`, `_` and `\` so user input matches literally inside LIKE.
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` pattern with `\` as the escape character.
pub fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(term.trim()))).escape('\\')
}

/// `prefix%` pattern, matched literally up to the wildcard.
pub fn prefix_pattern(prefix: &str) -> LikeExpr {
    LikeExpr::new(format!("{}%", escape_like_pattern(prefix))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}

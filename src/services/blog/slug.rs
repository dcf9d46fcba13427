//! URL slugs for blog posts.

use crate::errors::{Result, SchoolError};
use crate::models::blog::{entities::BlogPost, requests::CreatePostRequest};
use crate::storage::Storage;

/// Lowercase ASCII letters and digits joined by single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("post");
    }
    slug
}

/// `base` if free, otherwise `base-N` with the smallest free `N >= 2`.
pub fn next_available_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| format!("{base}-{}", uuid::Uuid::new_v4().simple()))
}

/// Inserts the post under the first free slug for its title.
///
/// Another post with the same title can claim the slug between the lookup
/// and the insert. That conflict is retried once with a fresh lookup.
pub(crate) async fn create_with_free_slug(
    storage: &dyn Storage,
    req: CreatePostRequest,
    author_id: i64,
) -> Result<BlogPost> {
    let base = slugify(&req.title);
    let mut retried = false;
    loop {
        let taken = storage.list_slugs_like(&base).await?;
        let slug = next_available_slug(&base, &taken);
        match storage.create_post(req.clone(), slug, author_id).await {
            Err(SchoolError::Conflict(_)) if !retried => retried = true,
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Prize Giving Day 2025!"), "prize-giving-day-2025");
        assert_eq!(slugify("  --Sports   & Culture-- "), "sports-culture");
        assert_eq!(slugify("Über café"), "ber-caf");
        assert_eq!(slugify("!!!"), "post");
    }

    #[test]
    fn test_collisions_get_numbered() {
        let taken = vec![
            "open-day".to_string(),
            "open-day-2".to_string(),
            "open-day-4".to_string(),
        ];
        assert_eq!(next_available_slug("open-day", &taken), "open-day-3");
        assert_eq!(next_available_slug("sports-day", &taken), "sports-day");
        assert_eq!(next_available_slug("open-day", &taken[1..]), "open-day");
    }
}

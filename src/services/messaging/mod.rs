//! Message threads between users.

pub mod threads;

use actix_web::{HttpRequest, HttpResponse};

use crate::models::ErrorCode;
use crate::models::messaging::entities::Thread;
use crate::services::{error_response, found, reject, stored};
use crate::storage::Storage;

pub const MAX_MESSAGE_CHARS: usize = 5000;

crate::services::lazy_service!(MessagingService);

/// Trimmed message body, or why it cannot be sent.
pub(crate) fn check_content(content: &str) -> Result<String, String> {
    let content = content.trim();
    if content.is_empty() {
        return Err("Message content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!(
            "Message content cannot exceed {MAX_MESSAGE_CHARS} characters"
        ));
    }
    Ok(content.to_string())
}

/// Loads a thread the user takes part in.
pub(crate) async fn participant_thread(
    storage: &dyn Storage,
    thread_id: i64,
    user_id: i64,
) -> Result<Thread, HttpResponse> {
    let thread = found(
        storage.get_thread(thread_id).await,
        ErrorCode::NotFound,
        "Thread not found",
    )?;
    match storage.is_thread_participant(thread_id, user_id).await {
        Ok(true) => Ok(thread),
        Ok(false) => Err(reject(
            actix_web::http::StatusCode::FORBIDDEN,
            ErrorCode::ThreadAccessDenied,
            "You are not a participant of this thread",
        )),
        Err(e) => Err(error_response(&e)),
    }
}

/// Distinct participant ids other than the creator.
pub(crate) fn other_participants(ids: &[i64], creator: i64) -> Vec<i64> {
    let mut others: Vec<i64> = ids.iter().copied().filter(|id| *id != creator).collect();
    others.sort_unstable();
    others.dedup();
    others
}

pub(crate) async fn missing_users(
    storage: &dyn Storage,
    ids: &[i64],
) -> Result<Vec<i64>, HttpResponse> {
    let users = stored(storage.get_users_by_ids(ids).await)?;
    Ok(ids
        .iter()
        .copied()
        .filter(|id| !users.iter().any(|u| u.id == *id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content() {
        assert_eq!(check_content("  Hello  "), Ok("Hello".to_string()));
        assert!(check_content("   ").is_err());
        assert!(check_content(&"x".repeat(MAX_MESSAGE_CHARS + 1)).is_err());
        assert!(check_content(&"x".repeat(MAX_MESSAGE_CHARS)).is_ok());
    }

    #[test]
    fn test_other_participants_drop_creator_and_duplicates() {
        assert_eq!(other_participants(&[5, 3, 5, 1], 1), vec![3, 5]);
        assert!(other_participants(&[1, 1], 1).is_empty());
        assert!(other_participants(&[], 1).is_empty());
    }
}

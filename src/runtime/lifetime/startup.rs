use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Creates the first administrator when the users table is empty.
///
/// The password comes from `ADMIN_PASSWORD`, otherwise a random one is
/// generated and printed once.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("{} account(s) present, admin seed skipped", count);
            return;
        }
        Ok(_) => info!("No accounts yet, creating the administrator"),
        Err(e) => {
            warn!("Failed to count users: {}, admin seed skipped", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD is not set, using a generated password");
        warn!("  Administrator password: {}", generated);
        warn!("  Store it now or set ADMIN_PASSWORD before the next start");
        warn!("==========================================================");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash the admin password: {}, admin seed skipped", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        phone: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Administrator created (id: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create the administrator: {}", e),
    }
}

/// Storage (with migrations applied), admin seed and the object cache.
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::from_config());
    warn!("In-memory cache initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_uses_charset() {
        let password = generate_random_password(24);
        assert_eq!(password.chars().count(), 24);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric() || "!@#$%".contains(c)));
    }
}

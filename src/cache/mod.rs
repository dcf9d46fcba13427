//! Object cache shared by the JWT middleware and cached read endpoints.
//!
//! Values are stored as JSON strings so any serde type can be cached
//! behind the object-safe [`ObjectCache`] trait.

pub mod moka;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

pub use self::moka::MokaCacheWrapper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// `ttl` is in seconds; 0 uses the configured default.
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
        }
    }

    pub async fn insert<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

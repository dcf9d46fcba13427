use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

/// Entry value plus its own time to live.
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default ttl: {}s",
            max_capacity, default_ttl
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl),
        }
    }

    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self::new(config.cache.max_capacity, config.cache.default_ttl)
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new(100, 60);
        cache.insert_raw("k".to_string(), "v".to_string(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".to_string()));

        cache.remove("k").await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_typed_helpers_round_trip_json() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaCacheWrapper::new(100, 60));
        cache.insert("n".to_string(), &vec![1_i64, 2, 3], 30).await;
        let value: CacheResult<Vec<i64>> = cache.get("n").await;
        assert_eq!(value, CacheResult::Found(vec![1, 2, 3]));

        cache.insert_raw("bad".to_string(), "not json".to_string(), 30).await;
        let value: CacheResult<Vec<i64>> = cache.get("bad").await;
        assert_eq!(value, CacheResult::NotFound);
    }
}

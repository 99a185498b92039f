use super::cache::Cache;
use super::types::StoreResult;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default lifetime of a cached value: 364 days from its last write.
pub const DEFAULT_TTL: Duration = Duration::from_secs(364 * 24 * 60 * 60);

struct CachedValue {
    value: Value,
    expires_at: Instant,
}

/// Expiring in-memory cache.
///
/// Values live in a `DashMap` next to their deadline. Expired values are
/// removed lazily when read and in bulk by the reaper task started with
/// [`MemoryCache::start_reaper`]. Nothing survives a restart.
pub struct MemoryCache {
    local_data: DashMap<String, CachedValue>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new() -> Arc<Self> {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            local_data: DashMap::new(),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.local_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_data.is_empty()
    }

    /// Removes every expired value and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.local_data.len();
        self.local_data.retain(|_, cached| cached.expires_at > now);
        before.saturating_sub(self.local_data.len())
    }

    /// Spawns the background task that periodically purges expired values.
    pub fn start_reaper(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tracing::info!("Starting cache reaper (every {:?})", every);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            loop {
                interval.tick().await;
                let purged = self.purge_expired();
                if purged > 0 {
                    tracing::debug!("Reaper dropped {} expired values", purged);
                }
            }
        })
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let now = Instant::now();

        if let Some(cached) = self.local_data.get(key) {
            if cached.expires_at > now {
                return Ok(Some(cached.value.clone()));
            }
        } else {
            return Ok(None);
        }

        // Expired: the read guard is released above, so removal cannot deadlock.
        self.local_data
            .remove_if(key, |_, cached| cached.expires_at <= now);
        tracing::debug!("Cache key expired: {}", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.local_data.insert(
            key.to_string(),
            CachedValue {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.local_data.remove(key);
        Ok(())
    }
}

use crate::core::cache::Cache;
use crate::core::currency::{RateSnapshot, RateSource};
use crate::store::MemoryCache;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const SNAPSHOT_KEY: &str = "latest";

/// Serves the last successful snapshot of `inner` until it is `ttl` old.
/// Failed fetches are not cached.
pub struct CachingRateSource<T: RateSource> {
    inner: T,
    cache: Arc<dyn Cache<String, RateSnapshot>>,
    ttl: Duration,
}

impl<T: RateSource> CachingRateSource<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Arc::new(MemoryCache::<String, RateSnapshot>::new()),
            ttl,
        }
    }
}

#[async_trait]
impl<T: RateSource> RateSource for CachingRateSource<T> {
    async fn fetch(&self) -> Result<RateSnapshot> {
        let key = SNAPSHOT_KEY.to_string();
        if let Some(snapshot) = self.cache.get(&key).await {
            return Ok(snapshot);
        }

        debug!("Cache miss for rate snapshot");
        let snapshot = self.inner.fetch().await?;
        self.cache.put(key, snapshot.clone(), Some(self.ttl)).await;
        Ok(snapshot)
    }

    async fn invalidate(&self) {
        debug!("Invalidating cached rate snapshot");
        self.cache.remove(&SNAPSHOT_KEY.to_string()).await;
    }
}

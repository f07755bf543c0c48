//! TTL cache over the assembled site settings document.
//!
//! Settings are read on every public page render but change only when
//! an editor saves the dashboard settings screen. The cache is an
//! explicit object owned by [`crate::state::AppState`] -- invalidated
//! by every settings mutation, with the TTL as a backstop against a
//! missed invalidation path.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct CachedSettings {
    stored_at: Instant,
    value: serde_json::Value,
}

/// A single-entry TTL cache for the merged settings document.
pub struct SettingsCache {
    ttl: Duration,
    inner: RwLock<Option<CachedSettings>>,
}

impl SettingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// The cached document, if present and within its TTL.
    pub async fn get(&self) -> Option<serde_json::Value> {
        let guard = self.inner.read().await;
        let cached = guard.as_ref()?;
        if cached.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some(cached.value.clone())
    }

    /// Replace the cached document, restarting the TTL.
    pub async fn store(&self, value: serde_json::Value) {
        let mut guard = self.inner.write().await;
        *guard = Some(CachedSettings {
            stored_at: Instant::now(),
            value,
        });
    }

    /// Drop the cached document. Called after every settings mutation.
    pub async fn invalidate(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = SettingsCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn stored_value_is_returned_until_invalidated() {
        let cache = SettingsCache::new(Duration::from_secs(60));
        cache.store(json!({"site": {"logoText": "DevDocs"}})).await;

        let value = cache.get().await.expect("fresh value should hit");
        assert_eq!(value["site"]["logoText"], "DevDocs");

        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn expired_value_misses() {
        let cache = SettingsCache::new(Duration::from_millis(10));
        cache.store(json!({"a": 1})).await;

        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(cache.get().await.is_none());
    }
}

//! In-memory cache store.

use super::CacheStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use taskhive_core::TaskhiveResult;

/// In-process cache store with per-entry expiry.
///
/// Backs tests and local development without a Redis instance. Expired
/// entries are treated as absent and dropped lazily on access.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().filter(|e| e.is_live()).count()
    }

    /// Returns true if the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_raw(&self, key: &str) -> TaskhiveResult<Option<String>> {
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_live() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TaskhiveResult<()> {
        self.entries.write().insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> TaskhiveResult<bool> {
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|e| e.is_live()))
    }

    async fn scan_matching(&self, pattern: &str) -> TaskhiveResult<Vec<String>> {
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|(key, entry)| entry.is_live() && key.contains(pattern))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheStore")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "v", Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(store.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "v", Duration::from_millis(30))
            .await
            .unwrap();

        // Just before the deadline the entry is still served.
        assert!(store.get_raw("k").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.get_raw("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value_and_ttl() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "old", Duration::from_millis(10))
            .await
            .unwrap();
        store
            .set_raw("k", "new", Duration::from_secs(30))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get_raw("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "v", Duration::from_secs(30))
            .await
            .unwrap();

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_scan_matching_skips_expired() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("tasks:list:a", "[]", Duration::from_millis(10))
            .await
            .unwrap();
        store
            .set_raw("tasks:list:b", "[]", Duration::from_secs(30))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;

        let keys = store.scan_matching("tasks:list").await.unwrap();
        assert_eq!(keys, vec!["tasks:list:b".to_string()]);
    }
}

//! Cache store contract and read-through extension.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration;
use taskhive_core::{TaskhiveError, TaskhiveResult};
use tracing::{debug, warn};

/// Backend contract required by the cache layer.
///
/// Four operations are the entire protocol: point read, write-with-expiry,
/// point delete, and substring key enumeration. Any store offering them
/// (networked, in-memory, embedded) is substitutable.
///
/// Values are stored as JSON text. A stored entry is immutable until it is
/// overwritten, expires, or is deleted; there are no partial updates.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Gets a raw JSON value.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> TaskhiveResult<Option<String>>;

    /// Sets a raw JSON value with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TaskhiveResult<()>;

    /// Deletes a key.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> TaskhiveResult<bool>;

    /// Returns every live key containing `pattern` as a substring.
    async fn scan_matching(&self, pattern: &str) -> TaskhiveResult<Vec<String>>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Result of a read-through lookup: the value plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLookup<T> {
    /// The looked-up or freshly computed value.
    pub value: T,
    /// Whether the value was served from the cache.
    pub cached: bool,
}

impl<T> CacheLookup<T> {
    /// Wraps a value served from the cache.
    #[must_use]
    pub const fn hit(value: T) -> Self {
        Self {
            value,
            cached: true,
        }
    }

    /// Wraps a freshly computed value.
    #[must_use]
    pub const fn miss(value: T) -> Self {
        Self {
            value,
            cached: false,
        }
    }

    /// Unwraps the value, discarding provenance.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Extension trait with typed and read-through methods.
///
/// Serialization is symmetric: values are written as JSON and read back
/// through the identical deserialization, so cache hits and misses are
/// shape-compatible.
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed value from the cache.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> TaskhiveResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)
                    .map_err(|e| TaskhiveError::Cache(format!("Undecodable entry: {}", e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> TaskhiveResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| TaskhiveError::Cache(format!("Unencodable value: {}", e)))?;
        self.set_raw(key, &json, ttl).await
    }

    /// Looks up `key`, computing and caching the value on a miss.
    ///
    /// On a hit the stored value is returned marked as cache-served. On a
    /// miss `compute` runs; its failure propagates unmodified and nothing
    /// is written. On success the result is written with `ttl` and
    /// returned marked as freshly computed.
    ///
    /// The cache is an accelerator, not a correctness dependency: a
    /// backend failure on either the read or the write degrades to the
    /// computed value with a warning logged, never an error to the caller.
    /// Exactly one backend read per call, at most one backend write, and
    /// an entry is never read then rewritten in the same call.
    ///
    /// Concurrent callers missing on the same key each compute and write
    /// independently; a per-key single-flight guard would remove that
    /// redundancy.
    async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> TaskhiveResult<CacheLookup<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = TaskhiveResult<T>> + Send,
    {
        match self.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                return Ok(CacheLookup::hit(value));
            }
            Ok(None) => debug!("Cache miss for key '{}'", key),
            Err(e) => warn!("Cache read failed for key '{}', computing directly: {}", key, e),
        }

        let value = compute().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("Cache write skipped for key '{}': {}", key, e);
        }

        Ok(CacheLookup::miss(value))
    }

    /// Removes every cached entry whose key contains `pattern`.
    ///
    /// Returns the number of entries removed; zero matches is a no-op.
    /// Backend failures are logged and reported as zero removals so a
    /// mutation that already committed never fails on its invalidation.
    async fn invalidate(&self, pattern: &str) -> u64 {
        let keys = match self.scan_matching(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Cache invalidation scan failed for '{}': {}", pattern, e);
                return 0;
            }
        };

        let mut removed = 0u64;
        for key in &keys {
            match self.delete(key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to delete cached key '{}': {}", key, e),
            }
        }

        debug!(
            "Invalidated {} cache entries matching '{}'",
            removed, pattern
        );
        removed
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheExt for T {}

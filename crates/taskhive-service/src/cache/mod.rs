//! Caching infrastructure for the service layer.
//!
//! A read-through cache in front of per-user task reads: deterministic key
//! construction ([`keys`]), a four-operation backend contract
//! ([`CacheStore`]) with Redis and in-memory implementations, and the
//! read-through/invalidation extension ([`CacheExt`]).
//!
//! The cache layer holds no in-process state and performs no
//! synchronization of its own; coordination is delegated to the backend's
//! per-key atomicity. Concurrent misses on the same key each compute and
//! write independently (last writer wins with equivalent values). There is
//! a small window between a mutation's commit and its invalidation call in
//! which a concurrent reader can repopulate a stale entry; it expires with
//! the entry's TTL.

pub mod keys;

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::MemoryCacheStore;
pub use redis_store::RedisCacheStore;
pub use store::{CacheExt, CacheLookup, CacheStore};

use std::time::Duration;
use taskhive_config::CacheConfig;

/// Default TTL for collection reads (task listings, top-N).
pub const LIST_TTL: Duration = Duration::from_secs(30);

/// Default TTL for single-record reads.
pub const ENTRY_TTL: Duration = Duration::from_secs(60);

/// Per-operation TTLs, resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    /// TTL for list-style reads.
    pub list: Duration,
    /// TTL for single-record reads.
    pub entry: Duration,
}

impl CacheTtls {
    /// Resolves TTLs from the cache configuration section.
    ///
    /// A per-operation TTL set to zero falls back to the configured
    /// default TTL.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        let default = config.default_ttl();
        Self {
            list: if config.list_ttl_secs == 0 {
                default
            } else {
                config.list_ttl()
            },
            entry: if config.entry_ttl_secs == 0 {
                default
            } else {
                config.entry_ttl()
            },
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            list: LIST_TTL,
            entry: ENTRY_TTL,
        }
    }
}

//! In-memory key-value cache with per-entry TTL expiry
//!
//! Provides a cache that stores cloneable values keyed by string, with
//! per-entry expiry timestamps, eager removal of stale entries on read,
//! and a periodic background sweep that bounds memory growth from keys
//! that are written once and never read again.

mod cache;
mod types;

pub use cache::ExpiringCache;
pub use types::CacheStats;

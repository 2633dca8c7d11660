//! Cache Module
//!
//! Provides TTL caching over a pluggable storage backend.

mod clock;
mod entry;
mod stats;
mod storage;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use storage::{FileStorage, MemoryStorage, SharedStorage, StorageBackend};
pub use store::CacheStore;

// == Public Constants ==
/// Default time-to-live for cache writes: 30 minutes in milliseconds
pub const DEFAULT_TTL_MS: u64 = 30 * 60 * 1000;

//! Cache Entry Module
//!
//! Defines the envelope stored for every cached value: the data, the write
//! timestamp and the TTL, all in milliseconds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A cached value with its write time and time-to-live.
///
/// Persisted as a JSON object with exactly the keys `data`, `timestamp` and `ttl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Write timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Time-to-live in milliseconds
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry written at `now_ms`.
    ///
    /// Negative TTLs are clamped to zero, producing an entry that is already expired.
    pub fn new(data: T, ttl_ms: i64, now_ms: i64) -> Self {
        Self {
            data,
            timestamp: now_ms,
            ttl: ttl_ms.max(0) as u64,
        }
    }

    // == Elapsed ==
    /// Milliseconds since the entry was written. Negative when the clock went backwards.
    pub fn elapsed_ms(&self, now_ms: i64) -> i128 {
        i128::from(now_ms) - i128::from(self.timestamp)
    }

    // == Is Valid ==
    /// Checks whether the entry is still fresh at `now_ms`.
    ///
    /// Boundary condition: an entry whose elapsed time equals its TTL is already
    /// invalid. Validity is strictly `elapsed < ttl`.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        self.elapsed_ms(now_ms) < i128::from(self.ttl)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: i64) -> u64 {
        let remaining = i128::from(self.ttl) - self.elapsed_ms(now_ms);
        remaining.clamp(0, i128::from(self.ttl)) as u64
    }
}

impl CacheEntry<Value> {
    // == From Stored ==
    /// Reads an envelope back from its stored JSON form.
    ///
    /// Returns `None` unless the value is an object with exactly `data`,
    /// an integer `timestamp` and a non-negative integer `ttl`.
    pub fn from_stored(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        if object.len() != 3 {
            return None;
        }

        Some(Self {
            data: object.get("data")?.clone(),
            timestamp: object.get("timestamp")?.as_i64()?,
            ttl: object.get("ttl")?.as_u64()?,
        })
    }
}

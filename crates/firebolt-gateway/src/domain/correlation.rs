//! Correlation ID for request tracking.
//!
//! The gateway speaks JSON-RPC with integer ids, so correlation ids are a
//! monotonically increasing `u64` rather than anything time-ordered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Correlation ID linking an outbound request to its eventual response.
///
/// Serialized as the bare integer used in the JSON-RPC `id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(u64);

impl CorrelationId {
    /// Wrap a raw wire id
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw wire id
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Read a correlation id out of a JSON-RPC `id` value.
    ///
    /// Only non-negative integers are ids we could have issued; anything
    /// else (strings, floats, null) cannot match an outstanding call.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        value.as_u64().map(Self)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CorrelationId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<CorrelationId> for u64 {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}

/// Allocator for fresh correlation ids.
///
/// Ids start at 1 and wrap on overflow; uniqueness among *outstanding* calls
/// is enforced by the correlation table, which skips ids still in use.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Start allocating from a specific id
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocate the next id
    pub fn next_id(&self) -> CorrelationId {
        CorrelationId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

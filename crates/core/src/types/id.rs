//! Line item identifiers.
//!
//! IDs are plain integers so persisted carts match the historical layout,
//! where IDs were epoch milliseconds taken at insertion time. Generation
//! goes through [`LineItemIdGenerator`], which seeds from the clock once
//! and then increments, so two items added in the same millisecond still
//! get distinct IDs.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// Type-safe ID for a cart line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(i64);

impl LineItemId {
    /// Create an ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LineItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<LineItemId> for i64 {
    fn from(id: LineItemId) -> Self {
        id.0
    }
}

/// Monotonic generator for [`LineItemId`]s.
///
/// Seeded from the current epoch milliseconds at construction, then
/// strictly incrementing. IDs from a single generator never collide;
/// uniqueness across process restarts is only as good as the clock, which
/// matches the durability of the rest of the client-local state.
#[derive(Debug)]
pub struct LineItemIdGenerator {
    next: AtomicI64,
}

impl LineItemIdGenerator {
    /// Create a generator seeded from the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Create a generator with an explicit seed (for tests).
    #[must_use]
    pub const fn with_seed(seed: i64) -> Self {
        Self {
            next: AtomicI64::new(seed),
        }
    }

    /// Hand out the next ID.
    pub fn next_id(&self) -> LineItemId {
        LineItemId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for LineItemIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let generator = LineItemIdGenerator::with_seed(1000);
        let a = generator.next_id();
        let b = generator.next_id();
        let c = generator.next_id();
        assert_eq!(a.as_i64(), 1000);
        assert_eq!(b.as_i64(), 1001);
        assert_eq!(c.as_i64(), 1002);
    }

    #[test]
    fn test_rapid_generation_never_collides() {
        let generator = LineItemIdGenerator::new();
        let ids: Vec<LineItemId> = (0..1000).map(|_| generator.next_id()).collect();
        let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_serde_transparent() {
        let id = LineItemId::new(1_700_000_000_000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1700000000000");
        let back: LineItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

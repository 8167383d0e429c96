//! Integration tests for Tangerine Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tangerine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Login-gated add/order scenarios over in-memory storage
//! - `persistence` - File-backed state round-trips and tolerance of
//!   malformed persisted data
//!
//! The crate body only provides shared helpers; the scenarios live under
//! `tests/`.

use std::sync::Arc;

use tangerine_cart::{CartStore, EventSink, MemoryStore, RecordingSink};
use tangerine_core::{LineItemIdGenerator, Price, UserProfile};

/// A cart over in-memory storage with a recording sink attached.
pub struct Harness {
    /// The store under test.
    pub store: CartStore<MemoryStore>,
    /// Every UI event the store emitted.
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    /// Fresh harness: empty storage, not authenticated.
    #[must_use]
    pub fn new() -> Self {
        let sink = Arc::new(RecordingSink::new());
        let store = CartStore::with_id_generator(
            MemoryStore::new(),
            Arc::clone(&sink) as Arc<dyn EventSink>,
            LineItemIdGenerator::with_seed(1_000),
        );
        Self { store, sink }
    }

    /// Fresh harness with the session flag already set.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory store fails, which it does not.
    #[must_use]
    pub fn logged_in(name: &str) -> Self {
        let harness = Self::new();
        harness
            .store
            .log_in(&UserProfile::new(name))
            .expect("memory store never fails");
        harness
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Price helper: cents to `Price`.
#[must_use]
pub fn cents(value: i64) -> Price {
    Price::from_cents(value)
}

//! Tangerine Cart library.
//!
//! A client-local shopping cart: mutation is gated behind a login flag,
//! contents are persisted whole through an injected key-value store, and
//! UI side effects (login prompt, notifications, badge count) are emitted
//! as abstract events for a presentation layer to handle.
//!
//! The store never caches: every operation re-reads the persisted cart,
//! mutates it in memory, and writes it back, so the visible badge count
//! can never drift from persisted state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod events;
pub mod keys;
pub mod storage;
pub mod store;
pub mod ui;

pub use error::CartError;
pub use events::{EventSink, RecordingSink, UiEvent};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{AddOutcome, CartStore, RejectReason, CHECKOUT_REDIRECT_DELAY};
pub use ui::UiAdapter;

//! Unified error type for cart operations.
//!
//! The taxonomy is deliberately small: an unauthenticated mutation is a
//! business outcome ([`crate::store::AddOutcome::Rejected`]), not an
//! error, and malformed persisted data is treated as absent. What remains
//! is storage failure and the serialization of outgoing state.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors a cart operation can surface to its caller.
#[derive(Debug, Error)]
pub enum CartError {
    /// The backing store failed; nothing was durably recorded.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Outgoing cart state could not be serialized. Incoming data never
    /// takes this path - unreadable persisted values read as absent.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

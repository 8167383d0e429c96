//! Tangerine Core - Shared types library.
//!
//! This crate provides the common types used across all Tangerine Cart
//! components:
//! - `cart` - The cart store library (storage, state, UI events)
//! - `cli` - Command-line front end standing in for the host page
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   cart line item and user profile records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

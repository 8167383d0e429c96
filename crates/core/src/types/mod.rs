//! Core types for Tangerine Cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;
pub mod price;
pub mod profile;

pub use id::*;
pub use item::CartLineItem;
pub use price::Price;
pub use profile::UserProfile;

//! Storage keys for persisted cart state.
//!
//! The layout is the one the cart has always used: a flat key-value store
//! with JSON-encoded values where structure is needed.

/// Key for the session flag; the exact string `"true"` means
/// authenticated, anything else (or absence) means not.
pub const USER_LOGGED_IN: &str = "userLoggedIn";

/// Marker value for an authenticated session.
pub const LOGGED_IN_MARKER: &str = "true";

/// Key for the JSON-encoded user profile, or absent.
pub const USER_DATA: &str = "userData";

/// Key for the JSON-encoded array of cart line items, or absent.
pub const CART_ITEMS: &str = "cartItems";

//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as JSON numbers (the layout the persisted cart has
//! always used), so serialization goes through `rust_decimal`'s float
//! codec rather than the default string form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price.
///
/// Currency is implicit (single-currency shop); the value is in the
/// currency's standard unit (e.g., dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Price {
    /// Format for display (e.g., "$19.99").
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_json_number() {
        let price = Price::from_cents(599);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "5.99");
    }

    #[test]
    fn test_price_round_trips_through_json() {
        let price = Price::from_cents(999);
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(599).to_string(), "$5.99");
        assert_eq!(Price::from_cents(1000).to_string(), "$10.00");
    }
}

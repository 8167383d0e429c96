//! Cart line item domain type.
//!
//! Serialized field names are camelCase to match the persisted `cartItems`
//! layout (see the `cart` crate's storage keys module).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::LineItemId;
use crate::types::price::Price;

/// One product entry in the cart.
///
/// `name` is the uniqueness key: repeat adds of the same name merge into
/// one line by incrementing `quantity`. `price`, `image` and `added_at`
/// are snapshots taken at first insertion and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique line item ID, assigned at creation time.
    pub id: LineItemId,
    /// Product name; case-sensitive merge key, unique within a cart.
    pub name: String,
    /// Unit price snapshot from the first add.
    pub price: Price,
    /// Optional product image reference from the first add.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of units; always >= 1.
    pub quantity: u32,
    /// When the item was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Create a fresh line item with quantity 1, added now.
    #[must_use]
    pub fn new(id: LineItemId, name: impl Into<String>, price: Price, image: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * rust_decimal::Decimal::from(self.quantity))
    }
}

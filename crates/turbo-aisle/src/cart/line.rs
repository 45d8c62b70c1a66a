//! Cart line type.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// One item in the cart.
///
/// Serialized as `{id, name, price, quantity}`, the shape of the stored
/// snapshot. A line in the cart always has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    /// Display name captured when the line was created.
    pub name: String,
    /// Whole-unit price captured when the line was created.
    #[serde(rename = "price")]
    pub unit_price: i64,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: i64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, saturating.
    pub fn line_total(&self) -> i64 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

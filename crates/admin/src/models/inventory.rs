//! Inventory items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ims_core::{InventoryItemId, Price, StockStatus};

use crate::db::Record;

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock_quantity: u32,
    pub last_updated: NaiveDate,
}

impl InventoryItem {
    /// Availability derived from the on-hand quantity.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.stock_quantity)
    }

    /// Whether any units are on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Value of the units on hand.
    #[must_use]
    pub fn stock_value(&self) -> Price {
        self.price * self.stock_quantity
    }
}

impl Record for InventoryItem {
    type Id = InventoryItemId;
    const KIND: &'static str = "inventory item";
    const ID_WIDTH: usize = 3;

    fn id(&self) -> &InventoryItemId {
        &self.id
    }

    fn with_id(self, id: InventoryItemId) -> Self {
        Self { id, ..self }
    }
}

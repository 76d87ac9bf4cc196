//! Customer orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ims_core::{OrderId, OrderStatus, Price};

use crate::db::Record;

/// An order placed by a customer.
///
/// `customer` is free text; nothing ties it to a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub date: NaiveDate,
    pub total: Price,
    pub status: OrderStatus,
    pub items: u32,
    pub payment_method: String,
}

impl Record for Order {
    type Id = OrderId;
    const KIND: &'static str = "order";
    const ID_PREFIX: &'static str = "ORD-";
    const ID_WIDTH: usize = 3;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn with_id(self, id: OrderId) -> Self {
        Self { id, ..self }
    }
}

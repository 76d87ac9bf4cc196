//! Customer accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ims_core::{CustomerId, CustomerStatus};

use crate::db::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
    pub total_orders: u32,
    pub last_order_date: Option<NaiveDate>,
}

impl Record for Customer {
    type Id = CustomerId;
    const KIND: &'static str = "customer";

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn with_id(self, id: CustomerId) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email.clone()))
    }
}

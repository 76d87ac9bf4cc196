//! Outbound shipments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ims_core::{ShipmentId, ShipmentStatus};

use crate::db::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_number: String,
    pub customer: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub items: u32,
    /// Unset while the shipment is still pending.
    pub shipped_date: Option<NaiveDate>,
    /// Actual or expected delivery date.
    pub delivery_date: NaiveDate,
}

impl Record for Shipment {
    type Id = ShipmentId;
    const KIND: &'static str = "shipment";

    fn id(&self) -> &ShipmentId {
        &self.id
    }

    fn with_id(self, id: ShipmentId) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("tracking_number", self.tracking_number.clone()))
    }
}

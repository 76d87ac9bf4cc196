//! Warehouse locations.

use serde::{Deserialize, Serialize};

use ims_core::WarehouseId;

use crate::db::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub location: String,
    pub manager: String,
    pub capacity: u32,
    pub utilized: u32,
    pub products: u32,
}

impl Warehouse {
    /// Utilized share of capacity as a whole percentage, rounded half up.
    #[must_use]
    pub fn utilization_percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        let scaled = u64::from(self.utilized) * 200 / u64::from(self.capacity);
        u32::try_from(scaled.div_ceil(2)).unwrap_or(u32::MAX)
    }
}

impl Record for Warehouse {
    type Id = WarehouseId;
    const KIND: &'static str = "warehouse";
    const ID_PREFIX: &'static str = "WH-";
    const ID_WIDTH: usize = 3;

    fn id(&self) -> &WarehouseId {
        &self.id
    }

    fn with_id(self, id: WarehouseId) -> Self {
        Self { id, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(capacity: u32, utilized: u32) -> Warehouse {
        Warehouse {
            id: WarehouseId::new("WH-001"),
            name: "North Distribution Center".to_string(),
            location: "Seattle, WA".to_string(),
            manager: "David Wilson".to_string(),
            capacity,
            utilized,
            products: 120,
        }
    }

    #[test]
    fn test_utilization_rounds_to_whole_percent() {
        assert_eq!(warehouse(5000, 3850).utilization_percent(), 77);
        assert_eq!(warehouse(6500, 5900).utilization_percent(), 91);
        assert_eq!(warehouse(200, 1).utilization_percent(), 1);
        assert_eq!(warehouse(8, 1).utilization_percent(), 13);
    }

    #[test]
    fn test_zero_capacity_is_zero_percent() {
        assert_eq!(warehouse(0, 0).utilization_percent(), 0);
    }
}

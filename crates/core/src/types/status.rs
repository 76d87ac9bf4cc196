//! Status enums for the console's record kinds.
//!
//! Each record kind draws its status from a small closed set. The wire names
//! match what the console has always used in forms and query strings, e.g.
//! orders use `Pending`, shipments use `in-transit`.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// A closed set of values that can be offered in a select input.
pub trait Choice: Copy + Sized + 'static {
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Value submitted by forms.
    fn as_str(self) -> &'static str;

    /// Label shown to people.
    fn label(self) -> &'static str;

    /// Look a value up by its form value.
    fn from_form_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::Manager, Self::User];

    fn as_str(self) -> &'static str {
        Self::as_str(self)
    }

    fn label(self) -> &'static str {
        Self::label(self)
    }
}

/// Order processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl Choice for OrderStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Shipment tracking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Returned,
}

impl Choice for ShipmentStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Returned,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in-transit",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Returned => "Returned",
        }
    }
}

/// Customer account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl Choice for CustomerStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Stock availability of an inventory item, derived from its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Availability for a given on-hand quantity.
    #[must_use]
    pub const fn for_quantity(quantity: u32) -> Self {
        if quantity > 0 {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

impl Choice for StockStatus {
    const ALL: &'static [Self] = &[Self::InStock, Self::OutOfStock];

    fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_status_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ShipmentStatus::InTransit).ok().as_deref(),
            Some("\"in-transit\"")
        );
        assert_eq!(
            ShipmentStatus::from_form_value("in-transit"),
            Some(ShipmentStatus::InTransit)
        );
    }

    #[test]
    fn test_form_values_round_trip_for_every_choice() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_form_value(status.as_str()), Some(*status));
        }
        for status in CustomerStatus::ALL {
            assert_eq!(
                CustomerStatus::from_form_value(status.as_str()),
                Some(*status)
            );
        }
    }

    #[test]
    fn test_unknown_form_values_are_rejected() {
        assert_eq!(OrderStatus::from_form_value("pending"), None);
        assert_eq!(ShipmentStatus::from_form_value("cancelled"), None);
    }

    #[test]
    fn test_stock_status_follows_quantity() {
        assert_eq!(StockStatus::for_quantity(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_quantity(3), StockStatus::InStock);
    }
}

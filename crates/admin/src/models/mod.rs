//! Domain models for the console.
//!
//! The identity held by the session plus one row type per record screen.

pub mod customer;
pub mod identity;
pub mod inventory;
pub mod order;
pub mod shipment;
pub mod user_account;
pub mod warehouse;

pub use customer::Customer;
pub use identity::{Identity, keys as session_keys};
pub use inventory::InventoryItem;
pub use order::Order;
pub use shipment::Shipment;
pub use user_account::UserAccount;
pub use warehouse::Warehouse;

//! IMS Core - Shared types library.
//!
//! This crate provides the types shared by the inventory management console:
//! - `admin` - The server-rendered administrative console
//! - `integration-tests` - End-to-end tests driving the console router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no session handling,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for record IDs, emails, roles, prices and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

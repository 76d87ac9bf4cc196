//! Inventory management console library.
//!
//! Server-rendered admin console: session handling, route guards, record
//! tables and the screens built on them. Exposed as a library so the
//! integration tests can drive the full router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod flash;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

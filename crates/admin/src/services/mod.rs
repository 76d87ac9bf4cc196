//! Business services for the console.
//!
//! - [`auth`] - Credential verification against an account directory
//! - [`session`] - The per-browser session store and its durable slot

pub mod auth;
pub mod session;

pub use auth::{AuthProvider, DirectoryEntry, StaticDirectory};
pub use session::{
    MemorySlot, PendingLogin, PendingLogins, SessionSlot, SessionState, SessionStore,
    TowerSessionSlot,
};

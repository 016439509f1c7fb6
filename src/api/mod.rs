//! Admin-plane HTTP API module.
pub mod error;
pub mod openapi;
pub mod subscriptions;
pub mod system;
pub mod topics;
pub mod types;

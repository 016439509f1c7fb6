//! Admin-plane service library crate.
//!
//! # Purpose
//! Exposes the topic and subscription reconcilers, backend abstraction, HTTP
//! API surface, and configuration for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the HTTP API and the backend seam for clarity.
pub mod admin;
pub mod api;
pub mod app;
pub mod backend;
pub mod config;
pub mod model;
pub mod observability;

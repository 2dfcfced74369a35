//! # kaziflow_core
//!
//! Core domain logic for KaziFlow.

pub mod auth;
pub mod db;
pub mod invoices;
pub mod migrate;
pub mod models;
pub mod notifications;
pub mod qr;
pub mod risk;
pub mod seed;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

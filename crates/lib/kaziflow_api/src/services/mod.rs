//! Business-logic services sitting between handlers and `kaziflow_core`.

pub mod auth;
pub mod risk;

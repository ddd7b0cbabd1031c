//! Pure domain types: plan, configuration schema, error enums.

pub mod config;
pub mod error;
pub mod plan;

//! Infrastructure adapters: real filesystem and config-file loading.

pub mod config;
pub mod fs;

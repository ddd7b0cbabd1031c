//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `tokio`, `std::fs`, or `std::process`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Step errors ──────────────────────────────────────────────────────────────

/// Errors raised while executing a provisioning step.
///
/// The variant determines the process exit code: an external command's own
/// non-zero status is surfaced verbatim, everything else maps to 1.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("static root {path} exists but is not a directory")]
    PathConflict { path: PathBuf },

    #[error("creating directory {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {code}")]
    CommandFailed { program: String, code: i32 },

    #[error("'{program}' was terminated by a signal")]
    Killed { program: String },
}

impl StepError {
    /// Process exit code for this failure.
    ///
    /// `CommandFailed` propagates the external tool's own status; all other
    /// failures collapse to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

// ── Config errors ────────────────────────────────────────────────────────────

/// Errors related to configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config field '{0}' must not be empty")]
    EmptyField(&'static str),
}

//! Domain types and validators for staticprep configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Default static asset root, relative to the working directory.
pub const DEFAULT_STATIC_DIR: &str = "staticfiles";
/// Flag the framework's management commands take to skip prompts.
pub const NON_INTERACTIVE_FLAG: &str = "--noinput";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `staticprep.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Directory collected assets land in. Created if missing.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Interpreter used to run the manage script.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Path to the framework's management entry point.
    #[serde(default = "default_manage_script")]
    pub manage_script: String,

    /// Settings for the asset-collection step.
    #[serde(default)]
    pub collectstatic: CollectstaticConfig,

    /// Settings for the gated schema-migration step.
    #[serde(default)]
    pub migrate: MigrateConfig,
}

/// Asset-collection step configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectstaticConfig {
    /// Extra arguments passed to `collectstatic`.
    /// The non-interactive flag is guaranteed at plan construction even
    /// when omitted here.
    #[serde(default = "default_collect_args")]
    pub args: Vec<String>,
}

/// Schema-migration step configuration. Off unless explicitly enabled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MigrateConfig {
    /// Whether the migration step runs at all.
    #[serde(default)]
    pub enabled: bool,

    /// Extra arguments passed to `migrate`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            interpreter: default_interpreter(),
            manage_script: default_manage_script(),
            collectstatic: CollectstaticConfig::default(),
            migrate: MigrateConfig::default(),
        }
    }
}

impl Default for CollectstaticConfig {
    fn default() -> Self {
        Self {
            args: default_collect_args(),
        }
    }
}

fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_manage_script() -> String {
    "manage.py".to_string()
}

fn default_collect_args() -> Vec<String> {
    vec![NON_INTERACTIVE_FLAG.to_string()]
}

// ── Validators ───────────────────────────────────────────────────────────────

impl PrepConfig {
    /// Validates that the fields the plan depends on are present.
    ///
    /// Empty strings would otherwise surface later as confusing spawn or
    /// filesystem errors.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.static_dir.trim().is_empty() {
            return Err(ConfigError::EmptyField("static_dir").into());
        }
        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::EmptyField("interpreter").into());
        }
        if self.manage_script.trim().is_empty() {
            return Err(ConfigError::EmptyField("manage_script").into());
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

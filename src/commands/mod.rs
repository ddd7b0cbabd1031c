//! Command handlers — one module per subcommand.

pub mod doctor;
pub mod plan;
pub mod run;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::domain::config::PrepConfig;

/// Configuration flags shared by `run`, `plan`, and `doctor`.
/// CLI values override `staticprep.yaml`.
#[derive(Args, Default)]
pub struct ConfigArgs {
    /// Config file (defaults to ./staticprep.yaml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory collected assets land in
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<String>,

    /// Interpreter used to run the manage script
    #[arg(long, value_name = "PROG")]
    pub interpreter: Option<String>,

    /// Path to the framework's management entry point
    #[arg(long = "manage-py", value_name = "PATH")]
    pub manage_py: Option<String>,
}

impl ConfigArgs {
    /// Load the config file, apply CLI overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is missing (when explicit),
    /// unreadable, malformed, or fails validation.
    pub fn resolve(&self) -> Result<PrepConfig> {
        let mut cfg = crate::infra::config::load(self.config.as_deref())?;
        if let Some(dir) = &self.static_dir {
            cfg.static_dir.clone_from(dir);
        }
        if let Some(prog) = &self.interpreter {
            cfg.interpreter.clone_from(prog);
        }
        if let Some(script) = &self.manage_py {
            cfg.manage_script.clone_from(script);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

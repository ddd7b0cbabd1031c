//! Config-file loading for `staticprep.yaml`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::config::PrepConfig;
use crate::domain::error::ConfigError;

/// Default config filename, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "staticprep.yaml";

/// Load configuration.
///
/// An explicitly passed path must exist; the default path is optional and
/// silently falls back to built-in defaults when absent.
///
/// # Errors
///
/// Returns an error if an explicit path is missing, or if any config file
/// exists but cannot be read or parsed.
pub fn load(explicit: Option<&Path>) -> Result<PrepConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            read(path)
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read(path)
            } else {
                Ok(PrepConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<PrepConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

//! Filesystem infrastructure — production implementation of the engine's
//! `LocalFs` port.

use std::path::Path;

use crate::runner::LocalFs;

/// Real filesystem backing for provisioning runs.
pub struct RealFs;

impl LocalFs for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

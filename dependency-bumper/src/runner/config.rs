//! Runner configuration.

use crate::config::Credentials;
use std::path::{Path, PathBuf};

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the bump configuration file.
    config_path: PathBuf,
    /// Code host and board credentials.
    credentials: Credentials,
    /// Whether to preview changes without cloning, pushing or filing cards.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(config_path: PathBuf, credentials: Credentials, dry_run: bool) -> Self {
        Self {
            config_path,
            credentials,
            dry_run,
        }
    }

    /// Returns the bump configuration file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

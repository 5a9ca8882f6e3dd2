//! Configuration loading.
//!
//! This module parses the `bump.toml` file that lists the packages to bump,
//! the target version, and the conventions of the consuming repositories.

mod credentials;
mod error;
mod settings;

pub use credentials::Credentials;
pub use error::ConfigError;
pub use settings::{
    default_card_description_template, default_card_title_format,
    default_commit_message_format, BumpConfig, CardSettings, GitSettings, ProjectSettings,
    SearchScope,
};

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

impl BumpConfig {
    /// Loads and validates a bump configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, malformed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading bump configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::parse(&content, path)?;
        debug!(
            version = %config.version,
            packages = config.packages.len(),
            "Loaded bump configuration"
        );
        Ok(config)
    }

    /// Parses and validates configuration text. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is malformed or fails validation.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: message.to_string(),
            })
        };

        if self.version.trim().is_empty() {
            return fail("version cannot be empty");
        }

        if self.packages.is_empty() {
            return fail("at least one package must be listed");
        }

        let mut seen = HashSet::new();
        for package in &self.packages {
            if package.trim().is_empty() {
                return fail("package names cannot be empty");
            }
            if !seen.insert(package.as_str()) {
                return fail(&format!("package '{package}' is listed more than once"));
            }
        }

        if self.max_projects == Some(0) {
            return fail("max-projects must be at least 1");
        }

        if self.search.organization.trim().is_empty() {
            return fail("search.organization cannot be empty");
        }

        if self.search.extension.trim().is_empty() {
            return fail("search.extension cannot be empty");
        }

        if self.search.extension.starts_with('.') {
            return fail("search.extension must not start with a dot");
        }

        if self.git.host.trim().is_empty() {
            return fail("git.host cannot be empty");
        }

        if self.git.user_name.trim().is_empty() || self.git.user_email.trim().is_empty() {
            return fail("git.user-name and git.user-email cannot be empty");
        }

        if self.git.commit_message_format.trim().is_empty() {
            return fail("git.commit-message-format cannot be empty");
        }

        if self.card.title_format.trim().is_empty() {
            return fail("card.title-format cannot be empty");
        }

        if self.card.description_template.trim().is_empty() {
            return fail("card.description-template cannot be empty");
        }

        Ok(())
    }
}

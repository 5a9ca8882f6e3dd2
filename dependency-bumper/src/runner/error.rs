//! Runner error types.

use crate::editing::EditError;
use crate::publishing::PublishError;
use crate::templates::TemplateError;

/// Errors that can occur while setting up a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Board HTTP client initialization errors.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors that end processing of a single project.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ProjectError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

//! Bump configuration deserialization.

use serde::Deserialize;
use std::path::PathBuf;

/// Parsed contents of a `bump.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BumpConfig {
    /// The version every consumer is moved to (e.g. "1.0.21").
    pub version: String,

    /// Package names to bump, processed in order.
    pub packages: Vec<String>,

    /// Upper bound on resolved projects per package (unbounded when absent).
    #[serde(default)]
    pub max_projects: Option<usize>,

    /// Code search scope.
    #[serde(default)]
    pub search: SearchScope,

    /// Project file conventions.
    #[serde(default)]
    pub project: ProjectSettings,

    /// Clone, commit and push settings.
    #[serde(default)]
    pub git: GitSettings,

    /// Review card settings.
    #[serde(default)]
    pub card: CardSettings,
}

/// Where to look for consumers of a package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchScope {
    /// Organization the search is restricted to.
    pub organization: String,

    /// Project file extension, without the leading dot.
    pub extension: String,

    /// File name excluded from the results, usually the package's own project.
    pub exclude_filename: Option<String>,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            organization: "trustpilot".to_string(),
            extension: "csproj".to_string(),
            exclude_filename: Some("InvitationsModel.csproj".to_string()),
        }
    }
}

/// How packages are declared inside consumer project files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectSettings {
    /// Prefix of the published package identifier (`<prefix><package>`).
    pub package_prefix: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            package_prefix: "Trustpilot.".to_string(),
        }
    }
}

/// Local clone and commit identity settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GitSettings {
    /// Host serving the repositories.
    pub host: String,

    /// Commit author name.
    pub user_name: String,

    /// Commit author email.
    pub user_email: String,

    /// Directory clones are placed in, one subdirectory per repository.
    pub workspace: PathBuf,

    /// Handlebars format for commit messages.
    pub commit_message_format: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            user_name: "Trustpilot Invitations Robot User".to_string(),
            user_email: "spe+trustpilot-invitations-robot-user@trustpilot.com".to_string(),
            workspace: std::env::temp_dir(),
            commit_message_format: default_commit_message_format(),
        }
    }
}

/// Review card settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CardSettings {
    /// Handlebars format for card titles. The branch name is derived from it.
    pub title_format: String,

    /// Handlebars template for card descriptions.
    pub description_template: String,

    /// Base URL of the board API.
    pub api_url: String,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            title_format: default_card_title_format(),
            description_template: default_card_description_template(),
            api_url: "https://api.trello.com/1".to_string(),
        }
    }
}

/// Default handlebars format for commit messages.
pub fn default_commit_message_format() -> String {
    "Updated {{package}} to version {{version}}".to_string()
}

/// Default handlebars format for card titles.
pub fn default_card_title_format() -> String {
    "{{repository}}: update {{package}} to {{version}}".to_string()
}

/// Default handlebars template for card descriptions.
pub fn default_card_description_template() -> String {
    "This card was created automatically to review the {{package}} {{version}} upgrade in {{full_name}}.\n\
\n\
Outcome: {{outcome}}\n\
{{#if branch}}Branch: {{branch}}\n{{/if}}\
{{#if reason}}Reason: {{reason}}\n{{/if}}"
        .to_string()
}

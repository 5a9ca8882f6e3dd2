//! Template renderer.

use crate::resolution::ResolvedProject;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (card text and commit messages are plain text)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// How a project ended up, as shown on its review card.
#[derive(Debug, Clone, Copy)]
pub struct CardOutcome<'a> {
    /// Short status label, e.g. "updated" or "skipped".
    pub status: &'a str,

    /// Branch the change was pushed to, if any.
    pub branch: Option<&'a str>,

    /// Why nothing was pushed, if applicable.
    pub reason: Option<&'a str>,
}

impl<'a> CardOutcome<'a> {
    /// The change was pushed to `branch`.
    #[must_use]
    pub fn updated(branch: &'a str) -> Self {
        Self {
            status: "updated",
            branch: Some(branch),
            reason: None,
        }
    }

    /// Nothing was pushed, for `reason`.
    #[must_use]
    pub fn skipped(reason: &'a str) -> Self {
        Self {
            status: "skipped",
            branch: None,
            reason: Some(reason),
        }
    }
}

/// Renders titles, commit messages and card descriptions.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the human-readable title of a project's bump.
    ///
    /// The same title names the review card and, normalized, the branch.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_title(
        &self,
        format: &str,
        project: &ResolvedProject,
        package: &str,
        version: &str,
    ) -> Result<String, super::TemplateError> {
        let data = project_data(project, package, version);
        self.render_template(format, &data)
    }

    /// Renders a commit message.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_commit_message(
        &self,
        format: &str,
        package: &str,
        version: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "package": package,
            "version": version
        });
        self.render_template(format, &data)
    }

    /// Renders a card description carrying the project's outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_card_description(
        &self,
        template: &str,
        project: &ResolvedProject,
        package: &str,
        version: &str,
        outcome: CardOutcome<'_>,
    ) -> Result<String, super::TemplateError> {
        let mut data = project_data(project, package, version);
        data["outcome"] = json!(outcome.status);
        data["branch"] = json!(outcome.branch.unwrap_or(""));
        data["reason"] = json!(outcome.reason.unwrap_or(""));
        self.render_template(template, &data)
    }

    fn render_template(&self, template: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

fn project_data(project: &ResolvedProject, package: &str, version: &str) -> Value {
    json!({
        "repository": project.name,
        "full_name": project.full_name,
        "project_path": project.project_path,
        "package": package,
        "version": version
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        default_card_description_template, default_card_title_format,
        default_commit_message_format,
    };

    fn sample_project() -> ResolvedProject {
        ResolvedProject {
            repository_id: 1,
            owner: "trustpilot".to_string(),
            name: "invitations-api".to_string(),
            full_name: "trustpilot/invitations-api".to_string(),
            project_path: "src/Api/Api.csproj".to_string(),
        }
    }

    #[test]
    fn renders_default_title() {
        let renderer = TemplateRenderer::new();
        let title = renderer
            .render_title(
                &default_card_title_format(),
                &sample_project(),
                "InvitationsModel",
                "1.0.21",
            )
            .unwrap();
        assert_eq!(title, "invitations-api: update InvitationsModel to 1.0.21");
    }

    #[test]
    fn renders_default_commit_message() {
        let renderer = TemplateRenderer::new();
        let message = renderer
            .render_commit_message(&default_commit_message_format(), "InvitationsModel", "1.0.21")
            .unwrap();
        assert_eq!(message, "Updated InvitationsModel to version 1.0.21");
    }

    #[test]
    fn description_includes_branch_for_updates() {
        let renderer = TemplateRenderer::new();
        let description = renderer
            .render_card_description(
                &default_card_description_template(),
                &sample_project(),
                "InvitationsModel",
                "1.0.21",
                CardOutcome::updated("invitations-api-update"),
            )
            .unwrap();

        assert!(description.contains("trustpilot/invitations-api"));
        assert!(description.contains("Outcome: updated"));
        assert!(description.contains("Branch: invitations-api-update"));
        assert!(!description.contains("Reason:"));
    }

    #[test]
    fn description_includes_reason_for_skips() {
        let renderer = TemplateRenderer::new();
        let description = renderer
            .render_card_description(
                &default_card_description_template(),
                &sample_project(),
                "InvitationsModel",
                "1.0.21",
                CardOutcome::skipped("can't update version automatically"),
            )
            .unwrap();

        assert!(description.contains("Outcome: skipped"));
        assert!(description.contains("Reason: can't update version automatically"));
        assert!(!description.contains("Branch:"));
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render_commit_message("{{missing}}", "A", "1.0.0");
        assert!(result.is_err());
    }

    #[test]
    fn no_html_escaping() {
        let renderer = TemplateRenderer::new();
        let message = renderer
            .render_commit_message("{{package}}", "<A&B>", "1.0.0")
            .unwrap();
        assert_eq!(message, "<A&B>");
    }
}

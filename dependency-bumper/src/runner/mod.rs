//! Orchestrates a version bump run.
//!
//! For every configured package: locate consumers, resolve the editable
//! projects, then for each project clone, edit, publish, and file a review
//! card. Everything runs sequentially.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::cards::{BoardClient, CardStatus};
use crate::config::{BumpConfig, Credentials};
use crate::discovery::{build_search_query, search_consumers};
use crate::editing::{edit_project_file, EditOutcome};
use crate::github::CodeHost;
use crate::publishing::{
    clone_directory, clone_repository, clone_url, publish_change, CommitIdentity, PublishStatus,
};
use crate::resolution::{resolve_projects, ResolvedProject, Resolution};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::{generate_branch_name, CardOutcome, TemplateRenderer};
use error::ProjectError;
use octocrab::Octocrab;
use tracing::{error, info, info_span, warn, Instrument};

/// User agent sent to the board API.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Runs the bump pipeline for every configured package.
pub struct Runner {
    bump: BumpConfig,
    credentials: Credentials,
    dry_run: bool,
    host: Box<dyn CodeHost>,
    board: BoardClient,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the bump config cannot be loaded or a client
    /// cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let bump = BumpConfig::load(config.config_path())?;
        let octocrab = Octocrab::builder()
            .personal_token(config.credentials().github_token.clone())
            .build()?;
        Self::with_code_host(bump, &config, Box::new(octocrab))
    }

    /// Builds a runner around an already loaded config and code host.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Http`] if the board HTTP client cannot be built.
    pub fn with_code_host(
        bump: BumpConfig,
        config: &RunnerConfig,
        host: Box<dyn CodeHost>,
    ) -> Result<Self, RunnerError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let board = BoardClient::new(client, &bump.card.api_url, config.credentials());
        Ok(Self {
            bump,
            credentials: config.credentials().clone(),
            dry_run: config.dry_run(),
            host,
            board,
            renderer: TemplateRenderer::new(),
        })
    }

    /// Executes the full orchestration flow.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::new(self.dry_run);
        info!(
            version = %self.bump.version,
            packages = self.bump.packages.len(),
            dry_run = self.dry_run,
            "Starting run"
        );

        for package in &self.bump.packages {
            self.process_package(package, &mut summary)
                .instrument(info_span!("package", package = %package))
                .await;
        }

        summary
    }

    async fn process_package(&self, package: &str, summary: &mut RunSummary) {
        summary.packages_processed += 1;

        let hits = match search_consumers(self.host.as_ref(), package, &self.bump.search).await {
            Ok(hits) => hits,
            Err(e) => {
                error!(error = %e, "Failed to search for consumers");
                summary.packages_failed += 1;
                return;
            }
        };

        if hits.is_empty() {
            info!(
                query = %build_search_query(package, &self.bump.search),
                "No results for package"
            );
            summary.packages_without_consumers += 1;
            return;
        }

        summary.search_hits += hits.len();

        let resolution = resolve_projects(self.host.as_ref(), &hits, self.bump.max_projects).await;
        summary.projects_resolved += resolution.projects.len();
        summary.repositories_excluded += resolution.excluded.len();

        if self.dry_run {
            self.print_dry_run_preview(package, &resolution);
            return;
        }

        info!(count = resolution.projects.len(), "Processing projects for package");
        for project in resolution.projects.values() {
            let result = self
                .process_project(project, package)
                .instrument(info_span!("project", repo = %project.full_name))
                .await;
            summary.record_result(result);
        }
    }

    async fn process_project(&self, project: &ResolvedProject, package: &str) -> ProcessingResult {
        info!(path = %project.project_path, "Processing project");

        match self.try_process_project(project, package).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Project processing failed");
                ProcessingResult::Failed {
                    repository: project.full_name.clone(),
                    package: package.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_process_project(
        &self,
        project: &ResolvedProject,
        package: &str,
    ) -> Result<ProcessingResult, ProjectError> {
        let version = &self.bump.version;
        let title =
            self.renderer
                .render_title(&self.bump.card.title_format, project, package, version)?;
        let branch = generate_branch_name(&title)?;

        let url = clone_url(
            &self.bump.git.host,
            &self.credentials.github_token,
            &project.full_name,
        )?;
        let repo_dir = clone_directory(&self.bump.git.workspace, &project.name);
        clone_repository(&url, &repo_dir).await?;

        let project_file = repo_dir.join(&project.project_path);
        let prefix = &self.bump.project.package_prefix;

        match edit_project_file(&project_file, prefix, package, version)? {
            EditOutcome::Skipped { reason } => {
                let reason = reason.to_string();
                let card = self
                    .file_review_card(project, package, &title, CardOutcome::skipped(&reason))
                    .await;
                Ok(ProcessingResult::Skipped {
                    repository: project.full_name.clone(),
                    package: package.to_string(),
                    reason,
                    card,
                })
            }
            EditOutcome::Updated { .. } => {
                let message = self.renderer.render_commit_message(
                    &self.bump.git.commit_message_format,
                    package,
                    version,
                )?;
                let identity = CommitIdentity {
                    name: self.bump.git.user_name.clone(),
                    email: self.bump.git.user_email.clone(),
                };

                match publish_change(&repo_dir, &identity, &branch, &message).await {
                    PublishStatus::Pushed { branch } => {
                        let outcome = CardOutcome::updated(&branch);
                        let card = self
                            .file_review_card(project, package, &title, outcome)
                            .await;
                        Ok(ProcessingResult::Updated {
                            repository: project.full_name.clone(),
                            package: package.to_string(),
                            branch,
                            card,
                        })
                    }
                    PublishStatus::Skipped { reason } => {
                        let outcome = CardOutcome::skipped(&reason);
                        let card = self
                            .file_review_card(project, package, &title, outcome)
                            .await;
                        Ok(ProcessingResult::Skipped {
                            repository: project.full_name.clone(),
                            package: package.to_string(),
                            reason,
                            card,
                        })
                    }
                    PublishStatus::Failed { error } => Ok(ProcessingResult::Failed {
                        repository: project.full_name.clone(),
                        package: package.to_string(),
                        error,
                    }),
                }
            }
        }
    }

    async fn file_review_card(
        &self,
        project: &ResolvedProject,
        package: &str,
        title: &str,
        outcome: CardOutcome<'_>,
    ) -> CardStatus {
        let description = match self.renderer.render_card_description(
            &self.bump.card.description_template,
            project,
            package,
            &self.bump.version,
            outcome,
        ) {
            Ok(description) => description,
            Err(e) => {
                warn!(error = %e, "Failed to render card description");
                return CardStatus::Failed {
                    error: e.to_string(),
                };
            }
        };

        self.board.file_card(title, &description).await
    }

    fn print_dry_run_preview(&self, package: &str, resolution: &Resolution) {
        println!("\n[DRY RUN] Package: {package}");
        println!("  Would update to version {}", self.bump.version);
        println!("  Resolved {} projects:\n", resolution.projects.len());

        let total = resolution.projects.len();
        for (i, project) in resolution.projects.values().enumerate() {
            println!("  [{}/{}] {}", i + 1, total, project.full_name);
            println!("    Project file: {}", project.project_path);

            match self.renderer.render_title(
                &self.bump.card.title_format,
                project,
                package,
                &self.bump.version,
            ) {
                Ok(title) => {
                    println!("    Would file card: \"{title}\"");
                    match generate_branch_name(&title) {
                        Ok(branch) => println!("    Would push branch: {branch}"),
                        Err(e) => println!("    Invalid branch name: {e}"),
                    }
                }
                Err(e) => println!("    Invalid card title: {e}"),
            }
        }

        if !resolution.excluded.is_empty() {
            println!("\n  Excluded repositories:");
            for excluded in &resolution.excluded {
                println!("    {}: {}", excluded.full_name, excluded.reason);
            }
        }

        println!();
    }
}

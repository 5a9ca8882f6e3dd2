//! CLI for the dependency bumper.
//!
//! Reads a `bump.toml`, then moves every consumer of the listed packages to
//! the configured version and files a review card per project.

use clap::Parser;
use dependency_bumper::{Credentials, ProcessingResult, RunSummary, Runner, RunnerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dependency Bumper - Update an internal package across every repository that consumes it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the bump configuration file.
    #[arg(long, default_value = "bump.toml")]
    config: PathBuf,

    /// GitHub token used for code search, repository lookups and clones.
    #[arg(long, env = "TRUSTPILOT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Trello API key.
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    board_key: String,

    /// Trello API token.
    #[arg(long, env = "TRELLO_TOKEN", hide_env_values = true)]
    board_token: String,

    /// Trello list that review cards are filed into.
    #[arg(long, env = "TRELLO_INVITATIONS_REVIEW_LIST_ID")]
    board_list_id: String,

    /// Preview the projects that would be bumped without cloning or filing cards.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Octocrab and reqwest both pull in rustls; pin the provider before either builds a client.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();
    let config = RunnerConfig::new(
        args.config,
        Credentials {
            github_token: args.github_token,
            board_key: args.board_key,
            board_token: args.board_token,
            board_list_id: args.board_list_id,
        },
        args.dry_run,
    );

    let runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "Critical failure");
            return ExitCode::from(2);
        }
    };

    let summary = runner.run().await;
    print_summary(&summary);

    if summary.has_failures() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Sets up the global subscriber: compact single-line output, filtered by
/// `RUST_LOG` and falling back to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Packages processed: {}", summary.packages_processed);
    println!(
        "  Packages without consumers: {}",
        summary.packages_without_consumers
    );
    println!("  Packages failed: {}", summary.packages_failed);
    println!("  Search hits: {}", summary.search_hits);
    println!("  Projects resolved: {}", summary.projects_resolved);
    println!("  Repositories excluded: {}", summary.repositories_excluded);

    if summary.dry_run {
        return;
    }

    println!("  Projects updated: {}", summary.projects_updated);
    println!("  Projects skipped: {}", summary.projects_skipped);
    println!("  Projects failed: {}", summary.projects_failed);
    println!("  Cards created: {}", summary.cards_created);
    println!("  Cards failed: {}", summary.cards_failed);

    let failures: Vec<_> = summary
        .results
        .iter()
        .filter_map(|result| match result {
            ProcessingResult::Failed {
                repository,
                package,
                error,
            } => Some((repository, package, error)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!("\nFailures:");
        for (repository, package, error) in failures {
            println!("  {repository} ({package}): {error}");
        }
    }
}

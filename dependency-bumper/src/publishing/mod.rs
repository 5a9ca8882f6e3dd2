//! Cloning consumer repositories and publishing version bumps.
//!
//! Everything here shells out to `git`. Clones are authenticated through the
//! token embedded in the clone URL, so the URL is never logged and git
//! output is scrubbed before it ends up in an error.

mod error;
mod status;

pub use error::PublishError;
pub use status::PublishStatus;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info, info_span, Instrument};
use url::Url;

/// Author identity used for commits.
#[derive(Debug, Clone)]
pub struct CommitIdentity {
    /// Value for `user.name`.
    pub name: String,
    /// Value for `user.email`.
    pub email: String,
}

/// Builds the authenticated clone URL `https://<token>@<host>/<full_name>.git`.
///
/// # Errors
///
/// Returns [`PublishError::InvalidCloneUrl`] if the pieces do not form a URL.
pub fn clone_url(host: &str, token: &str, full_name: &str) -> Result<Url, PublishError> {
    let invalid = |message: String| PublishError::InvalidCloneUrl {
        full_name: full_name.to_string(),
        message,
    };

    let mut url = Url::parse(&format!("https://{host}/{full_name}.git"))
        .map_err(|e| invalid(e.to_string()))?;
    url.set_username(token)
        .map_err(|()| invalid("URL cannot carry credentials".to_string()))?;

    Ok(url)
}

/// Directory a repository is cloned into: `<workspace>/<name>`.
#[must_use]
pub fn clone_directory(workspace: &Path, repository_name: &str) -> PathBuf {
    workspace.join(repository_name)
}

/// Clones `url` into `destination`, replacing a stale clone from an earlier run.
///
/// # Errors
///
/// Returns [`PublishError`] if the directory cannot be prepared or git fails.
pub async fn clone_repository(url: &Url, destination: &Path) -> Result<(), PublishError> {
    let span = info_span!("clone", destination = %destination.display());

    async {
        if tokio::fs::try_exists(destination).await.unwrap_or(false) {
            debug!("Removing stale clone");
            tokio::fs::remove_dir_all(destination)
                .await
                .map_err(|e| PublishError::WorkspaceFailed {
                    path: destination.display().to_string(),
                    source: e,
                })?;
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PublishError::WorkspaceFailed {
                    path: parent.display().to_string(),
                    source: e,
                })?;
        }

        info!("Cloning repository");
        let output = git_command(None)
            .args(["clone", "--depth", "1", url.as_str()])
            .arg(destination)
            .output()
            .await
            .map_err(|e| PublishError::CloneFailed {
                message: format!("Failed to execute git clone: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PublishError::CloneFailed {
                message: format!("git clone failed: {}", redact_url(&stderr, url)),
            });
        }

        Ok(())
    }
    .instrument(span)
    .await
}

/// Commits the edited files on a new branch and pushes it to `origin`.
///
/// Failures never propagate: they are logged and reported as
/// [`PublishStatus::Failed`], leaving the clone as it is.
pub async fn publish_change(
    repo_dir: &Path,
    identity: &CommitIdentity,
    branch_name: &str,
    commit_message: &str,
) -> PublishStatus {
    let span = info_span!("publish", branch = %branch_name);

    async {
        info!("Committing and pushing changes");
        match commit_and_push(repo_dir, identity, branch_name, commit_message).await {
            Ok(status) => status,
            Err(e) => {
                error!(error = %e, "Committing and pushing changes failed");
                PublishStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
    .instrument(span)
    .await
}

async fn commit_and_push(
    repo_dir: &Path,
    identity: &CommitIdentity,
    branch_name: &str,
    commit_message: &str,
) -> Result<PublishStatus, PublishError> {
    run_git_command(repo_dir, &["config", "user.name", &identity.name]).await?;
    run_git_command(repo_dir, &["config", "user.email", &identity.email]).await?;

    debug!(branch = %branch_name, "Creating branch");
    run_git_command(repo_dir, &["checkout", "-b", branch_name]).await?;

    if !has_changes(repo_dir).await? {
        info!("No changes detected");
        return Ok(PublishStatus::Skipped {
            reason: "no changes made".to_string(),
        });
    }

    run_git_command(repo_dir, &["commit", "-am", commit_message]).await?;

    run_git_command(repo_dir, &["push", "origin", branch_name])
        .await
        .map_err(|e| PublishError::PushFailed {
            message: e.to_string(),
        })?;

    info!("Branch pushed");
    Ok(PublishStatus::Pushed {
        branch: branch_name.to_string(),
    })
}

/// Checks if tracked files have uncommitted changes.
async fn has_changes(repo_dir: &Path) -> Result<bool, PublishError> {
    let stdout =
        run_git_command(repo_dir, &["status", "--porcelain", "--untracked-files=no"]).await?;
    Ok(!stdout.trim().is_empty())
}

/// Runs a git command inside `repo_dir`, returning its stdout.
///
/// Errors name only the subcommand; the remaining arguments can carry a
/// whole commit message.
async fn run_git_command(repo_dir: &Path, args: &[&str]) -> Result<String, PublishError> {
    let subcommand = args.first().copied().unwrap_or_default();
    let output = git_command(Some(repo_dir))
        .args(args)
        .output()
        .await
        .map_err(|e| PublishError::GitFailed {
            command: subcommand.to_string(),
            message: format!("failed to execute: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PublishError::GitFailed {
            command: subcommand.to_string(),
            message: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// A `git` invocation that never waits on an interactive prompt.
fn git_command(current_dir: Option<&Path>) -> Command {
    let mut command = Command::new("git");
    command
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = current_dir {
        command.current_dir(dir);
    }
    command
}

/// Removes the credentials of `url` from `text`.
fn redact_url(text: &str, url: &Url) -> String {
    let mut redacted = text.to_string();
    if !url.username().is_empty() {
        redacted = redacted.replace(url.username(), "***");
    }
    if let Some(password) = url.password() {
        redacted = redacted.replace(password, "***");
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_authenticated_clone_url() {
        let url = clone_url("github.com", "ghp_token", "trustpilot/invitations-api").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghp_token@github.com/trustpilot/invitations-api.git"
        );
    }

    #[test]
    fn rejects_unusable_host() {
        let result = clone_url("exa mple.com", "token", "org/repo");
        assert!(matches!(result, Err(PublishError::InvalidCloneUrl { .. })));
    }

    #[test]
    fn clone_directory_is_named_after_repository() {
        assert_eq!(
            clone_directory(Path::new("/tmp"), "invitations-api"),
            PathBuf::from("/tmp/invitations-api")
        );
    }

    #[test]
    fn redacts_token_from_git_output() {
        let url = clone_url("github.com", "ghp_secret", "org/repo").unwrap();
        let message = "fatal: unable to access 'https://ghp_secret@github.com/org/repo.git/'";
        let redacted = redact_url(message, &url);
        assert!(!redacted.contains("ghp_secret"));
        assert!(redacted.contains("***@github.com"));
    }

    #[tokio::test]
    async fn git_errors_name_only_the_subcommand() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("not-a-directory");

        let spawn_error = run_git_command(&missing, &["commit", "-am", "A long message"])
            .await
            .unwrap_err();
        let exit_error = run_git_command(temp.path(), &["commit", "-am", "A long message"])
            .await
            .unwrap_err();

        for error in [spawn_error, exit_error] {
            match error {
                PublishError::GitFailed { command, .. } => assert_eq!(command, "commit"),
                other => panic!("expected git failure, got {other:?}"),
            }
        }
    }
}

//! A live run against local remotes and a mock board.

use async_trait::async_trait;
use dependency_bumper::{
    BumpConfig, CardStatus, CodeHost, Credentials, HostError, ProcessingResult,
    RepositoryAccess, Runner, RunnerConfig, SearchHit,
};
use mockito::Matcher;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use url::Url;

const TOKEN: &str = "ghp";

const SDK_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Trustpilot.InvitationsModel" Version="1.0.20" />
  </ItemGroup>
</Project>
"#;

const LEGACY_PROJECT: &str = r#"<Project ToolsVersion="15.0">
  <ItemGroup>
    <Reference Include="Trustpilot.InvitationsModel">
      <HintPath>..\packages\Trustpilot.InvitationsModel.1.0.20\lib\Trustpilot.InvitationsModel.dll</HintPath>
    </Reference>
  </ItemGroup>
</Project>
"#;

/// Organization whose search always returns the same hits and whose
/// repositories are all writable.
struct Organization {
    hits: Vec<SearchHit>,
}

#[async_trait]
impl CodeHost for Organization {
    async fn search_code(&self, _query: &str) -> Result<Vec<SearchHit>, HostError> {
        Ok(self.hits.clone())
    }

    async fn repository_access(
        &self,
        _owner: &str,
        _name: &str,
    ) -> Result<RepositoryAccess, HostError> {
        Ok(RepositoryAccess {
            archived: false,
            can_push: true,
        })
    }
}

fn hit(repository_id: u64, name: &str, path: &str) -> SearchHit {
    SearchHit {
        repository_id,
        owner: "trustpilot".to_string(),
        name: name.to_string(),
        full_name: format!("trustpilot/{name}"),
        path: path.to_string(),
    }
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Seed", "-c", "user.email=seed@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Creates `<remotes>/trustpilot/<name>.git` with `file` on `main`.
fn seed_remote(remotes: &Path, name: &str, file: &str, content: &str) -> PathBuf {
    let remote = remotes.join("trustpilot").join(format!("{name}.git"));
    std::fs::create_dir_all(&remote).unwrap();
    git(&remote, &["init", "--bare"]);
    git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let seed = remotes.join("seeds").join(name);
    std::fs::create_dir_all(&seed).unwrap();
    git(&seed, &["init"]);
    std::fs::write(seed.join(file), content).unwrap();
    git(&seed, &["add", file]);
    git(&seed, &["commit", "-m", "Initial commit"]);
    git(
        &seed,
        &["push", remote.to_str().unwrap(), "HEAD:refs/heads/main"],
    );

    remote
}

/// Points `https://<token>@github.com/` at `remotes` for every git child process.
fn redirect_clones(remotes: &Path) {
    let base = Url::from_directory_path(remotes).unwrap();
    std::env::set_var("GIT_CONFIG_COUNT", "2");
    std::env::set_var("GIT_CONFIG_KEY_0", format!("url.{base}.insteadOf"));
    std::env::set_var("GIT_CONFIG_VALUE_0", format!("https://{TOKEN}@github.com/"));
    std::env::set_var("GIT_CONFIG_KEY_1", "commit.gpgsign");
    std::env::set_var("GIT_CONFIG_VALUE_1", "false");
}

#[tokio::test]
async fn live_run_files_cards_only_for_reviewable_outcomes() {
    let temp = TempDir::new().unwrap();
    let remotes = temp.path().join("remotes");
    let workspace = temp.path().join("workspace");

    let api_remote = seed_remote(&remotes, "api", "Api.csproj", SDK_PROJECT);
    seed_remote(&remotes, "legacy", "Legacy.csproj", LEGACY_PROJECT);
    redirect_clones(&remotes);

    let mut board = mockito::Server::new_async().await;
    let api_card = board
        .mock("POST", "/cards")
        .match_query(Matcher::UrlEncoded(
            "name".into(),
            "api: update InvitationsModel to 1.0.21".into(),
        ))
        .with_status(200)
        .with_body(r#"{"id": "card-api", "shortUrl": "https://trello.com/c/api"}"#)
        .expect(1)
        .create_async()
        .await;
    let legacy_card = board
        .mock("POST", "/cards")
        .match_query(Matcher::UrlEncoded(
            "name".into(),
            "legacy: update InvitationsModel to 1.0.21".into(),
        ))
        .with_status(200)
        .with_body(r#"{"id": "card-legacy"}"#)
        .expect(1)
        .create_async()
        .await;

    let bump = BumpConfig::parse(
        &format!(
            r#"
version = "1.0.21"
packages = ["InvitationsModel"]

[git]
workspace = '{}'

[card]
api-url = '{}'
"#,
            workspace.display(),
            board.url()
        ),
        Path::new("bump.toml"),
    )
    .unwrap();

    let config = RunnerConfig::new(
        PathBuf::from("bump.toml"),
        Credentials {
            github_token: TOKEN.to_string(),
            board_key: "key".to_string(),
            board_token: "token".to_string(),
            board_list_id: "list".to_string(),
        },
        false,
    );
    let host = Organization {
        hits: vec![
            hit(1, "api", "Api.csproj"),
            hit(2, "legacy", "Legacy.csproj"),
            hit(3, "gone", "Gone.csproj"),
        ],
    };

    let runner = Runner::with_code_host(bump, &config, Box::new(host)).unwrap();
    let summary = runner.run().await;

    api_card.assert_async().await;
    legacy_card.assert_async().await;

    assert_eq!(summary.projects_resolved, 3);
    assert_eq!(summary.projects_updated, 1);
    assert_eq!(summary.projects_skipped, 1);
    assert_eq!(summary.projects_failed, 1);
    assert_eq!(summary.cards_created, 2);
    assert_eq!(summary.cards_failed, 0);
    assert_eq!(summary.results.len(), 3);

    let branch = "api-update-invitationsmodel-to-1-0-21";
    match &summary.results[0] {
        ProcessingResult::Updated {
            repository,
            branch: pushed,
            card,
            ..
        } => {
            assert_eq!(repository, "trustpilot/api");
            assert_eq!(pushed, branch);
            assert_eq!(
                card,
                &CardStatus::Created {
                    id: Some("card-api".to_string()),
                    url: Some("https://trello.com/c/api".to_string()),
                }
            );
        }
        other => panic!("expected update, got {other:?}"),
    }

    match &summary.results[1] {
        ProcessingResult::Skipped {
            repository,
            reason,
            card,
            ..
        } => {
            assert_eq!(repository, "trustpilot/legacy");
            assert_eq!(reason, "can't update version automatically");
            assert!(card.is_created());
        }
        other => panic!("expected skip, got {other:?}"),
    }

    assert!(matches!(
        &summary.results[2],
        ProcessingResult::Failed { repository, .. } if repository == "trustpilot/gone"
    ));

    let pushed = git(&api_remote, &["show", &format!("{branch}:Api.csproj")]);
    assert!(pushed.contains(r#"Version="1.0.21""#));
}

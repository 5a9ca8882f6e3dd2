#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod cards;
pub mod config;
pub mod discovery;
pub mod editing;
pub mod github;
pub mod publishing;
pub mod rate_limit;
pub mod resolution;
pub mod runner;
pub mod summary;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use cards::{BoardClient, CardError, CardStatus, CreatedCard};
pub use config::{BumpConfig, ConfigError, Credentials};
pub use discovery::{build_search_query, search_consumers, DiscoveryError, SearchHit};
pub use editing::{
    edit_project_file, file_includes_package, update_package_version, uses_package_reference,
    EditError, EditOutcome, SkipReason,
};
pub use github::{CodeHost, HostError, RepositoryAccess};
pub use publishing::{
    clone_directory, clone_repository, clone_url, publish_change, CommitIdentity, PublishError,
    PublishStatus,
};
pub use rate_limit::{
    check_rate_limit, ensure_rate_limit, wait_if_needed, RateLimitInfo, RateLimitResource,
};
pub use resolution::{
    resolve_projects, ExcludedRepository, ExclusionReason, Resolution, ResolvedProject,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{
    create_handlebars_registry, generate_branch_name, normalize_branch_name, CardOutcome,
    TemplateError, TemplateRenderer,
};

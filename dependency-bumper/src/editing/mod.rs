//! Package version editing in project files.
//!
//! Consumers declare the package as
//! `<PackageReference Include="<prefix><package>" Version="x.y.z" />`. The
//! version is rewritten with a line-oriented pattern substitution.

mod error;
mod outcome;

pub use error::EditError;
pub use outcome::{EditOutcome, SkipReason};

use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, info};

/// Element that marks the SDK-style project format.
const PACKAGE_REFERENCE_ELEMENT: &str = "<PackageReference";

/// Returns true if the content declares `Include="<prefix><package>"`.
#[must_use]
pub fn file_includes_package(content: &str, prefix: &str, package: &str) -> bool {
    content.contains(&format!("Include=\"{prefix}{package}\""))
}

/// Returns true if the content uses `<PackageReference>` entries.
#[must_use]
pub fn uses_package_reference(content: &str) -> bool {
    content.contains(PACKAGE_REFERENCE_ELEMENT)
}

/// Builds the pattern matching a package line.
///
/// Group 1 runs up to the opening quote of the last quoted value on the line,
/// group 2 is that value and group 3 is everything from its closing quote up
/// to the final `>`.
fn package_line_pattern(prefix: &str, package: &str) -> Result<Regex, regex::Error> {
    let identifier = regex::escape(&format!("{prefix}{package}"));
    Regex::new(&format!(r#"(.*"{identifier}".*")(.*)(".*>)"#))
}

/// Replaces the version of `package` on every line that declares it.
///
/// Only the version text changes, and applying the same version twice gives
/// the same result as applying it once. Content without a matching line is
/// returned unchanged.
///
/// # Errors
///
/// Returns an error if the pattern cannot be compiled.
pub fn update_package_version(
    content: &str,
    prefix: &str,
    package: &str,
    version: &str,
) -> Result<String, regex::Error> {
    let pattern = package_line_pattern(prefix, package)?;
    let updated = pattern.replace_all(content, |caps: &Captures| {
        format!("{}{}{}", &caps[1], version, &caps[3])
    });
    Ok(updated.into_owned())
}

/// Loads a project file, checks it can be edited, and rewrites the version.
///
/// The file is written back whenever both gates pass, even if the pattern
/// did not match; `changed` reports whether the content actually differs.
///
/// # Errors
///
/// Returns [`EditError`] if the file cannot be read or written.
pub fn edit_project_file(
    path: &Path,
    prefix: &str,
    package: &str,
    version: &str,
) -> Result<EditOutcome, EditError> {
    let content = std::fs::read_to_string(path).map_err(|e| EditError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    if !file_includes_package(&content, prefix, package) {
        info!(path = %path.display(), "Skipping, no package found for updating");
        return Ok(EditOutcome::Skipped {
            reason: SkipReason::PackageNotDeclared,
        });
    }

    if !uses_package_reference(&content) {
        info!(path = %path.display(), "Can't update version automatically, skipping");
        return Ok(EditOutcome::Skipped {
            reason: SkipReason::LegacyProjectFormat,
        });
    }

    info!(path = %path.display(), package, version, "Updating version in project");
    let updated = update_package_version(&content, prefix, package, version)?;
    let changed = updated != content;
    if !changed {
        debug!(path = %path.display(), "Version substitution left the file unchanged");
    }

    std::fs::write(path, updated).map_err(|e| EditError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(EditOutcome::Updated { changed })
}

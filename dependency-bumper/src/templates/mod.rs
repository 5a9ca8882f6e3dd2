//! Titles, branch names, commit messages and card text.
//!
//! Formats are Handlebars templates taken from the configuration.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, CardOutcome, TemplateRenderer};

use bstr::ByteSlice;

/// Normalizes a human-readable title into a branch name.
///
/// Lower-cases the title, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and trims leading and trailing `-`.
#[must_use]
pub fn normalize_branch_name(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalizes `title` and checks the result is a usable git branch name.
///
/// # Errors
///
/// Returns [`TemplateError::InvalidBranchName`] if the name is empty or not
/// a valid reference name.
pub fn generate_branch_name(title: &str) -> Result<String, TemplateError> {
    let name = normalize_branch_name(title);
    if name.is_empty() {
        return Err(TemplateError::InvalidBranchName {
            name,
            message: format!("title '{title}' has no alphanumeric characters"),
        });
    }

    gix_validate::reference::name_partial(name.as_bytes().as_bstr()).map_err(|e| {
        TemplateError::InvalidBranchName {
            name: name.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(name)
}

//! Project file editing outcomes.

use serde::Serialize;
use std::fmt;

/// Why a project file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `Include="<prefix><package>"` declaration in the file.
    PackageNotDeclared,

    /// The file does not use `<PackageReference>` entries.
    LegacyProjectFormat,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageNotDeclared => f.write_str("no package found for updating"),
            Self::LegacyProjectFormat => f.write_str("can't update version automatically"),
        }
    }
}

/// Result of editing one project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditOutcome {
    /// The file was rewritten.
    Updated {
        /// Whether the content differs from what was on disk.
        changed: bool,
    },

    /// The file was not touched.
    Skipped {
        /// Which gate rejected the file.
        reason: SkipReason,
    },
}

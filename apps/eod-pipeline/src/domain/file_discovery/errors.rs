//! File discovery errors.

use thiserror::Error;

use super::value_objects::FileType;

/// Placeholder substituted with the compact trade date in pattern templates.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Errors raised while building the per-date pattern table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Template does not reference the trade date.
    #[error("pattern for {file_type} must contain {{date}}: '{template}'")]
    MissingDatePlaceholder {
        /// File type the template belongs to.
        file_type: FileType,
        /// Offending template.
        template: String,
    },

    /// Template does not compile once the date is substituted.
    #[error("pattern for {file_type} is not a valid regex '{pattern}': {message}")]
    InvalidPattern {
        /// File type the template belongs to.
        file_type: FileType,
        /// Pattern after date substitution.
        pattern: String,
        /// Regex compiler message.
        message: String,
    },
}

/// A listed name matches the patterns of more than one file type.
///
/// This is a configuration defect: the name is never assigned to either type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' matches more than one configured file type: {}", format_types(.types))]
pub struct PatternAmbiguityError {
    /// Listed file name.
    pub name: String,
    /// Every type whose pattern matched.
    pub types: Vec<FileType>,
}

/// No listed file matched the pattern of a requested type for the trade date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no remote {file_type} file matches '{pattern}'")]
pub struct NoMatchError {
    /// Requested file type.
    pub file_type: FileType,
    /// Pattern the listing was filtered with.
    pub pattern: String,
}

fn format_types(types: &[FileType]) -> String {
    types
        .iter()
        .map(FileType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

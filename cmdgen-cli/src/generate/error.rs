//! Errors raised while turning a template and a tabular source into commands

use thiserror::Error;

/// Failure of a generation request.
///
/// Rows skipped for blank values are not errors; they are reported on the
/// [`GenerationResult`](super::GenerationResult) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no variables found in template (variables are written as {{name}}, e.g. {{x}})")]
    NoVariablesFound,

    #[error("missing columns for template variables: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("unsupported file format '{0}' (only .xlsx and .xls are supported)")]
    UnsupportedFormat(String),

    #[error("no commands generated ({skipped} row(s) skipped), check the spreadsheet data")]
    NoCommandsGenerated { skipped: usize },

    #[error("failed to read tabular data: {0}")]
    ReadFailure(String),
}

impl GenerateError {
    /// Build a read failure from anything printable
    pub fn read_failure(detail: impl std::fmt::Display) -> Self {
        GenerateError::ReadFailure(detail.to_string())
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(err: std::io::Error) -> Self {
        GenerateError::ReadFailure(err.to_string())
    }
}

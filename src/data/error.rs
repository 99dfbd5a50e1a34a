use thiserror::Error;

/// Everything that can abort a load attempt.
///
/// None of these leave a partially populated dataset behind.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty input, no header line found")]
    EmptyInput,

    #[error("no columns found in header")]
    NoColumns,

    #[error("invalid target column {index} (expected 0..{columns})")]
    InvalidTargetColumn { index: usize, columns: usize },

    #[error("no column named '{0}'")]
    UnknownTargetColumn(String),

    #[error("'{0}' is not a column number")]
    InvalidSelection(String),

    #[error("no valid data loaded")]
    NoValidData,

    #[error("mismatch between features ({features} rows) and labels ({labels})")]
    RowCountMismatch { features: usize, labels: usize },

    /// Only raised under [`NumericPolicy::Strict`](super::loader::NumericPolicy::Strict).
    #[error("line {line}, column {column}: '{token}' is not a number")]
    MalformedValue {
        line: usize,
        column: usize,
        token: String,
    },
}

use thiserror::Error;

/// Result alias for header cleaning and table parsing.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while turning raw metadata text into relational tables.
///
/// All variants are unrecoverable for the file being processed; callers
/// abort that file and move on to the next one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A header contained no ASCII letters or digits after cleaning.
    #[error("header '{0}' has no usable characters")]
    EmptyHeader(String),

    /// Two headers normalized to the same column name.
    #[error("duplicate header '{0}'")]
    DuplicateHeader(String),

    /// The header line and the ruler line disagree on column count.
    #[error("{headers} header(s) for {columns} ruler column(s)")]
    ColumnCountMismatch { headers: usize, columns: usize },
}

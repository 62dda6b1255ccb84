//! Error types for SQLite storage

use cardstock_core::storage::StorageError;
use cardstock_query::QueryBuildError;
use thiserror::Error;

/// SQLite storage error type
#[derive(Error, Debug)]
pub enum SqliteError {
    /// Database connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Schema/migration error
    #[error("schema error: {0}")]
    Schema(String),

    /// Statement construction error
    #[error("statement build error: {0}")]
    Build(#[from] QueryBuildError),

    /// Row not found where one was required
    #[error("not found: {0}")]
    NotFound(String),

    /// Parameter or row (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Underlying rusqlite error
    #[error("SQLite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for SQLite operations
pub type SqliteResult<T> = Result<T, SqliteError>;

impl From<SqliteError> for StorageError {
    fn from(err: SqliteError) -> Self {
        match err {
            SqliteError::Connection(msg) | SqliteError::Schema(msg) => Self::Backend(msg),
            SqliteError::Build(build) => match build {
                // caller mistakes: bad or empty input maps
                QueryBuildError::MissingColumn { .. } | QueryBuildError::EmptyPatch => {
                    Self::InvalidInput(build.to_string())
                }
                // a template referencing an unvalidated column is a
                // catalog bug, not bad caller input
                QueryBuildError::ParameterBinding { .. } => Self::Backend(build.to_string()),
            },
            SqliteError::NotFound(msg) => Self::NotFound(msg),
            SqliteError::Serialization(msg) => Self::Serialization(msg),
            SqliteError::Rusqlite(e) => Self::Backend(e.to_string()),
        }
    }
}

//! Error types for statement construction

use thiserror::Error;

/// Errors raised while composing a statement from caller input.
///
/// All of these are validation/construction failures, not I/O: none are
/// retryable, and every stage returns its error immediately without
/// partial recovery. `MissingColumn` and `EmptyPatch` are caller
/// mistakes; `ParameterBinding` is a catalog authoring bug and should be
/// caught by tests, never papered over at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryBuildError {
    /// A required column was absent from the caller-supplied value map
    #[error("missing required column `{column}` for query: {template}")]
    MissingColumn { column: String, template: String },

    /// A patch touched none of the whitelisted columns
    #[error("nothing patched")]
    EmptyPatch,

    /// A template placeholder had no bound value
    #[error("unbound named parameter `:{placeholder}` in query: {template}")]
    ParameterBinding {
        placeholder: String,
        template: String,
    },
}

/// Result type for statement construction
pub type BuildResult<T> = Result<T, QueryBuildError>;

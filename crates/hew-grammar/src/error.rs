//! Failure taxonomy for grammar loading.

use std::path::PathBuf;

use crate::grammar::GrammarError;
use crate::validate::ValidationError;

/// Errors that can occur when loading a grammar descriptor into a
/// [`LanguageHandle`](crate::LanguageHandle).
///
/// Every variant is terminal: retrying with the same artifact cannot succeed.
#[derive(Debug, thiserror::Error)]
pub enum GrammarLoadError {
    /// The descriptor artifact does not exist.
    #[error("grammar descriptor not found: {}", path.display())]
    NotFound {
        /// Where the artifact was expected.
        path: PathBuf,
    },

    /// The descriptor artifact exists but could not be read.
    #[error("failed to read grammar descriptor {}: {source}", path.display())]
    Io {
        /// The artifact that failed to read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is not a well-formed grammar.
    #[error("malformed grammar descriptor: {0}")]
    Malformed(String),

    /// The descriptor was produced for a different format revision.
    #[error(
        "incompatible grammar ABI: expected {expected}, found {}",
        found.as_deref().unwrap_or("no marker")
    )]
    IncompatibleAbi {
        /// The marker this runtime accepts.
        expected: String,
        /// The marker in the descriptor, if any.
        found: Option<String>,
    },

    /// The descriptor describes a different language than the one requested.
    #[error("grammar name mismatch: expected '{expected}', found '{found}'")]
    NameMismatch {
        /// The language that was requested.
        expected: String,
        /// The language the descriptor declares.
        found: String,
    },

    /// The descriptor parsed but failed structural validation.
    #[error("grammar validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl From<GrammarError> for GrammarLoadError {
    fn from(err: GrammarError) -> Self {
        match err {
            GrammarError::JsonParse(msg) => Self::Malformed(msg),
        }
    }
}

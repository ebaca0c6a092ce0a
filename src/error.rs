//! Error types for wpack.
//!
//! Two failure categories are kept apart: structured validation errors, which
//! carry a context trail that grows as the error crosses each wrapping
//! boundary, and unstructured system errors, which propagate unmodified.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// A schema validation failure.
///
/// `context_messages` is ordered innermost first: each boundary the error
/// crosses on its way out appends one message describing where it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{original_message}{}", render_context(.context_messages))]
pub struct ValidationError {
    pub original_message: String,
    pub context_messages: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            original_message: message.into(),
            context_messages: Vec::new(),
        }
    }

    /// Append an outer context message, keeping everything already recorded.
    pub fn with_context(mut self, message: impl Into<String>) -> Self {
        self.context_messages.push(message.into());
        self
    }
}

/// One context message per line, after the original message.
fn render_context(context_messages: &[String]) -> String {
    context_messages
        .iter()
        .map(|context| format!("\n{}", context))
        .collect()
}

/// Main error type for wpack operations.
#[derive(Error, Debug)]
pub enum WpackError {
    /// A configuration source was rejected by the schema.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A file could not be read. Never enriched with validation context.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A loader pattern could not be compiled into a matcher.
    #[error("invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// The configuration is valid but cannot be used as requested.
    #[error("{0}")]
    UserError(String),
}

impl WpackError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WpackError::Validation(_) => exit_codes::VALIDATION_FAILURE,
            WpackError::Io { .. } => exit_codes::IO_FAILURE,
            WpackError::Pattern { .. } => exit_codes::USER_ERROR,
            WpackError::UserError(_) => exit_codes::USER_ERROR,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WpackError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for wpack operations.
pub type Result<T> = std::result::Result<T, WpackError>;

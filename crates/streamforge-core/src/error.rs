//! Error types for StreamForge

use thiserror::Error;

use crate::element::TypeTag;

/// Error stored by a failed stream and returned by its terminal operations.
///
/// Errors are cloned rather than shared: every stream derived from a failed
/// stream reports an equal error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// Construction was given a value that is not a sequence of the element type.
    #[error("Source type error: cannot build a stream of {element}: {reason}")]
    SourceType { element: TypeTag, reason: String },

    /// Negative bound passed to `limit` or `skip`.
    #[error("Invalid argument: {operation} requires a non-negative bound, got {value}")]
    InvalidArgument {
        operation: &'static str,
        value: i64,
    },

    /// Collect destination cannot hold the stream's elements.
    #[error("Destination type error: cannot collect elements of {element}: {reason}")]
    DestinationType { element: TypeTag, reason: String },

    /// A `flat_map` callback produced a stream that had already failed.
    #[error("Nested stream error: {0}")]
    NestedStream(#[source] Box<StreamError>),

    /// Executor could not be built from configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure raised by caller code.
    #[error("{0}")]
    Custom(String),
}

impl StreamError {
    /// Creates a caller-defined error.
    pub fn custom(message: impl Into<String>) -> Self {
        StreamError::Custom(message.into())
    }

    /// Returns the innermost error, looking through nested stream failures.
    pub fn root_cause(&self) -> &StreamError {
        match self {
            StreamError::NestedStream(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for StreamForge operations
pub type Result<T> = std::result::Result<T, StreamError>;

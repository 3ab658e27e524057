//! Error types for the Argus invocation pipeline
//!
//! This module defines the errors a host pipeline can observe while dispatching
//! an invocation, using thiserror for the definitions.

use thiserror::Error;

/// Boxed error returned by an invocation processor that aborted a call
pub type ProcessorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// Argument slot replacement outside of the argument list
    #[error("Argument index {index} out of bounds (argument count: {len})")]
    ArgumentIndex { index: usize, len: usize },

    /// Metadata and argument list disagree on the parameter count
    #[error("Argument mismatch for {method}: expected {expected} arguments, got {actual}")]
    ArgumentMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// A processor refused to let the invocation proceed
    #[error("Invocation interrupted by processor '{processor}': {source}")]
    Interrupted {
        processor: String,
        #[source]
        source: ProcessorError,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an error raised by a processor
    pub fn interrupted<E>(processor: impl Into<String>, source: E) -> Self
    where
        E: Into<ProcessorError>,
    {
        Error::Interrupted {
            processor: processor.into(),
            source: source.into(),
        }
    }

    /// The processor error behind an interruption, downcast to a concrete type
    pub fn interruption<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::Interrupted { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

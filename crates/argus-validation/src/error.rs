//! Error types for the validation plugin
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use crate::violation::ConstraintViolations;
use thiserror::Error;

/// Raised when validated arguments fail and the method has no carrier parameter
///
/// Terminal for the invocation that produced it. Hosts translate it into a
/// user-visible failure; the violations are available through
/// [`ConstraintViolationError::violations`].
#[derive(Debug, Clone, Error)]
#[error("{violations}")]
pub struct ConstraintViolationError {
    violations: ConstraintViolations,
}

impl ConstraintViolationError {
    pub fn new(violations: ConstraintViolations) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &ConstraintViolations {
        &self.violations
    }

    pub fn into_violations(self) -> ConstraintViolations {
        self.violations
    }
}

/// Main error type for validation plugin operations
#[derive(Error, Debug)]
pub enum Error {
    /// Flagged arguments failed their constraints
    #[error("Constraint violation: {0}")]
    ConstraintViolation(#[from] ConstraintViolationError),

    /// The validator could not check a value
    #[error("Validator error: {message}")]
    Validator {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The configured provider could not supply a validator
    #[error("Validator provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid plugin settings
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// Error from the invocation pipeline
    #[error("Pipeline error: {0}")]
    Core(#[from] argus_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for validation plugin operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validator error without an underlying cause
    pub fn validator(message: impl Into<String>) -> Self {
        Self::Validator {
            message: message.into(),
            source: None,
        }
    }

    /// Create a provider error without an underlying cause
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Create a settings error
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// The violations behind a constraint violation error
    pub fn violations(&self) -> Option<&ConstraintViolations> {
        match self {
            Self::ConstraintViolation(err) => Some(err.violations()),
            _ => None,
        }
    }

    /// Convert into a pipeline interruption attributed to `processor`
    ///
    /// Pipeline errors pass through untouched; everything else keeps its
    /// concrete type as the interruption source.
    pub fn into_interruption(self, processor: &str) -> argus_core::Error {
        match self {
            Self::Core(err) => err,
            Self::ConstraintViolation(err) => argus_core::Error::interrupted(processor, err),
            other => argus_core::Error::interrupted(processor, other),
        }
    }
}

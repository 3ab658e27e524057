//! Argus Validation - constraint validation plugin for the invocation pipeline
//!
//! Once registered with the host, the plugin intercepts every dispatched
//! invocation before its target runs:
//!
//! - **Markers**: parameters annotated with [`Marker::AssertValid`], or with the
//!   generic [`Marker::Valid`] when the environment provides it, are validated
//! - **Violation Carrier**: a method that declares a [`ConstraintViolations`]
//!   parameter receives the collected violations there and runs regardless
//! - **Violation Error**: a method without such a parameter is aborted with a
//!   [`ConstraintViolationError`] when any constraint failed
//! - **Validator Seam**: constraint checking is delegated to a
//!   [`ConstraintValidator`] obtained from a [`ValidatorProvider`], defaulting
//!   to the `validator` crate
//!
//! # Example
//!
//! ```
//! use argus_core::{InvocationArguments, InvocationMetadata, ModulesBuilder, ParameterDescriptor};
//! use argus_validation::{ConstraintViolations, Marker, ValidatedArguments, ValidationPluginConfig};
//! use validator::Validate;
//!
//! #[derive(Debug, Validate)]
//! struct SignUp {
//!     #[validate(length(min = 3))]
//!     user: String,
//! }
//!
//! let modules = ModulesBuilder::new()
//!     .apply(&ValidationPluginConfig::new())
//!     .build();
//!
//! let metadata = InvocationMetadata::new("Accounts", "sign_up")
//!     .parameter(ParameterDescriptor::of::<SignUp>("form").annotated(Marker::AssertValid))
//!     .parameter(ParameterDescriptor::of::<ConstraintViolations>("violations"));
//! let args = InvocationArguments::new()
//!     .with_validated(SignUp { user: "al".to_string() })
//!     .with_null();
//!
//! let failed = modules
//!     .dispatch(&metadata, args, |args| {
//!         args.value::<ConstraintViolations>(1).map(|v| v.len()).unwrap_or(0)
//!     })
//!     .unwrap();
//! assert_eq!(failed, 1);
//! ```

pub mod error;
pub mod interceptor;
pub mod markers;
pub mod messages;
pub mod plugin;
pub mod provider;
pub mod settings;
pub mod validator;
pub mod violation;

// Re-export main types for convenience
pub use error::{ConstraintViolationError, Error, Result};
pub use interceptor::{ValidationInterceptor, ValidationOutcome, PROCESSOR_NAME};
pub use markers::{requires_validation, Marker, MarkerCatalog};
pub use plugin::ValidationPluginConfig;
pub use provider::{DefaultValidatorFactory, InstanceProvider, SharedValidator, ValidatorProvider};
pub use settings::ValidationSettings;
pub use crate::validator::{
    flatten_errors, validated, ConstraintValidator, Constraints, DefaultValidator,
    ValidatedArguments,
};
pub use violation::{ConstraintViolation, ConstraintViolations};

//! Argus Core - invocation pipeline seams for request-method plugins
//!
//! This crate models the parts of a host framework's request dispatch that a
//! plugin interacts with, and nothing more:
//!
//! - **Invocation Metadata**: declaring type, method name and annotated
//!   parameter descriptors of the target method
//! - **Invocation Arguments**: ordered, type-erased argument slots that
//!   processors may replace by index
//! - **Invocation Processors**: hooks run before the target executes
//! - **Module Wiring**: the builder plugins register with at startup, and the
//!   resulting dispatch pipeline
//! - **Logging**: an optional `tracing-subscriber` bootstrap for hosts
//!
//! # Example
//!
//! ```
//! use argus_core::{
//!     InvocationArguments, InvocationMetadata, ModulesBuilder, ParameterDescriptor,
//! };
//!
//! let modules = ModulesBuilder::new().build();
//! let metadata = InvocationMetadata::new("Greeter", "greet")
//!     .parameter(ParameterDescriptor::of::<String>("name"));
//! let args = InvocationArguments::new().with("world".to_string());
//!
//! let greeting = modules
//!     .dispatch(&metadata, args, |args| {
//!         format!("hello {}", args.value::<String>(0).unwrap())
//!     })
//!     .unwrap();
//! assert_eq!(greeting, "hello world");
//! ```

pub mod arguments;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod modules;
pub mod processor;

// Re-export main types for convenience
pub use arguments::{Argument, InvocationArguments};
pub use error::{Error, ProcessorError, Result};
pub use invocation::{Annotation, InvocationMetadata, ParameterDescriptor};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use modules::{Modules, ModulesBuilder, PluginModulesConfig};
pub use processor::InvocationProcessor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Module wiring for the invocation pipeline
//!
//! Plugins contribute processors through a [`PluginModulesConfig`] that receives
//! the host's [`ModulesBuilder`] at startup. The built [`Modules`] dispatch every
//! invocation through the registered processors, in registration order, before
//! calling the target.
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use crate::arguments::InvocationArguments;
use crate::error::{Error, Result};
use crate::invocation::InvocationMetadata;
use crate::processor::InvocationProcessor;
use std::fmt;
use std::sync::Arc;

/// Startup hook implemented by plugins
pub trait PluginModulesConfig {
    /// Register the plugin's modules and hand the builder back
    fn prepare(&self, builder: ModulesBuilder) -> ModulesBuilder;
}

/// Collects processors during host startup
#[derive(Default)]
pub struct ModulesBuilder {
    processors: Vec<Arc<dyn InvocationProcessor>>,
}

impl ModulesBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Register a processor instance
    pub fn add_invocation_processor(mut self, processor: Arc<dyn InvocationProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Register a processor by type, constructed with its default configuration
    pub fn add_invocation_processor_type<P>(self) -> Self
    where
        P: InvocationProcessor + Default + 'static,
    {
        self.add_invocation_processor(Arc::new(P::default()))
    }

    /// Let a plugin contribute its modules
    pub fn apply(self, config: &dyn PluginModulesConfig) -> Self {
        config.prepare(self)
    }

    /// Names of the registered processors in dispatch order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Whether a processor with the given name is registered
    pub fn contains_processor(&self, name: &str) -> bool {
        self.processors.iter().any(|p| p.name() == name)
    }

    /// Finish startup
    pub fn build(self) -> Modules {
        tracing::debug!(
            processors = ?self.processor_names(),
            "Invocation modules built"
        );
        Modules {
            processors: self.processors,
        }
    }
}

impl fmt::Debug for ModulesBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModulesBuilder")
            .field("processors", &self.processor_names())
            .finish()
    }
}

/// The active module set of a running host
#[derive(Clone)]
pub struct Modules {
    processors: Vec<Arc<dyn InvocationProcessor>>,
}

impl Modules {
    /// Run the processors, then the target
    ///
    /// The argument count must match the declared parameter count. The first
    /// processor error aborts the dispatch and is returned as is.
    pub fn dispatch<F, R>(
        &self,
        metadata: &InvocationMetadata,
        mut args: InvocationArguments,
        target: F,
    ) -> Result<R>
    where
        F: FnOnce(InvocationArguments) -> R,
    {
        let expected = metadata.parameters().len();
        if args.len() != expected {
            return Err(Error::ArgumentMismatch {
                method: metadata.qualified_name(),
                expected,
                actual: args.len(),
            });
        }

        for processor in &self.processors {
            tracing::trace!(
                processor = processor.name(),
                method = %metadata.qualified_name(),
                "Running invocation processor"
            );
            processor.on_invoke(metadata, &mut args)?;
        }

        Ok(target(args))
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Debug for Modules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modules")
            .field("processors", &self.processor_names())
            .finish()
    }
}

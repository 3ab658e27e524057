//! The validation interceptor
//!
//! Runs before every dispatched invocation. Parameters carrying a recognized
//! marker are validated, all violations are collected, and the result either
//! lands in the method's [`ConstraintViolations`] parameter or aborts the call
//! with a [`ConstraintViolationError`].
//!
//! # Decision table
//!
//! | flagged parameters | violations | carrier parameter | result |
//! |--------------------|------------|-------------------|--------|
//! | none               | -          | any               | proceed, arguments untouched |
//! | some               | none       | absent            | proceed |
//! | some               | any        | present at `k`    | carrier injected at `k`, proceed |
//! | some               | some       | absent            | abort with the violation error |
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use crate::error::{ConstraintViolationError, Error, Result};
use crate::markers::{requires_validation, MarkerCatalog};
use crate::messages;
use crate::provider::{DefaultValidatorFactory, SharedValidator, ValidatorProvider};
use crate::settings::ValidationSettings;
use crate::violation::ConstraintViolations;
use argus_core::logging::redaction;
use argus_core::{Argument, InvocationArguments, InvocationMetadata, InvocationProcessor};
use std::fmt;
use std::sync::Arc;

/// Name under which the interceptor registers with the host
pub const PROCESSOR_NAME: &str = "validation";

/// What the interceptor did with an invocation that may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No parameter was flagged; the validator was not consulted
    Skipped,
    /// Flagged parameters passed and the method has no carrier parameter
    Passed,
    /// A carrier with `count` violations was placed at argument `index`
    Injected { index: usize, count: usize },
}

/// Invocation processor validating marked parameters
pub struct ValidationInterceptor {
    settings: ValidationSettings,
    catalog: MarkerCatalog,
    provider: Option<Arc<dyn ValidatorProvider>>,
}

impl ValidationInterceptor {
    /// Interceptor with default settings and the default validator
    pub fn new() -> Self {
        Self::with_settings(ValidationSettings::default())
    }

    pub fn with_settings(settings: ValidationSettings) -> Self {
        Self {
            catalog: settings.marker_catalog(),
            settings,
            provider: None,
        }
    }

    /// Obtain validators from `provider` instead of the default factory
    pub fn with_provider(mut self, provider: Arc<dyn ValidatorProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Obtain validators from a factory function
    pub fn with_validator_factory<F>(self, factory: F) -> Self
    where
        F: Fn() -> Result<SharedValidator> + Send + Sync + 'static,
    {
        self.with_provider(Arc::new(factory))
    }

    /// Replace the marker catalog derived from the settings
    pub fn with_catalog(mut self, catalog: MarkerCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &MarkerCatalog {
        &self.catalog
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Position of the first parameter declared as [`ConstraintViolations`]
    pub fn index_of_violations(metadata: &InvocationMetadata) -> Option<usize> {
        metadata.position_of::<ConstraintViolations>()
    }

    /// Indexes of the parameters that must be validated, in declaration order
    pub fn flagged_parameters(&self, metadata: &InvocationMetadata) -> Vec<usize> {
        metadata
            .parameters()
            .iter()
            .enumerate()
            .filter(|(_, parameter)| requires_validation(parameter, &self.catalog))
            .map(|(index, _)| index)
            .collect()
    }

    fn acquire_validator(&self) -> Result<SharedValidator> {
        match &self.provider {
            Some(provider) => provider.provide(),
            None => DefaultValidatorFactory.provide(),
        }
    }

    /// Validate every flagged argument and collect the violations
    ///
    /// Returns `None` when no parameter is flagged. Every flagged argument is
    /// checked even after an earlier one failed.
    pub fn collect_violations(
        &self,
        metadata: &InvocationMetadata,
        args: &InvocationArguments,
    ) -> Result<Option<ConstraintViolations>> {
        let flagged = self.flagged_parameters(metadata);
        if flagged.is_empty() {
            return Ok(None);
        }

        let method = metadata.qualified_name();
        if args.len() < metadata.parameters().len() {
            return Err(argus_core::Error::ArgumentMismatch {
                method,
                expected: metadata.parameters().len(),
                actual: args.len(),
            }
            .into());
        }

        let validator = self.acquire_validator()?;
        let mut violations = Vec::new();

        for index in flagged {
            let parameter = &metadata.parameters()[index];
            let argument = args.get(index);

            tracing::debug!(
                code = messages::VALIDATING,
                method = %method,
                parameter = parameter.name(),
                index,
                "{}",
                messages::render(
                    messages::VALIDATING,
                    &[&index, &parameter.name(), &method, &self.render_argument(argument)],
                )
            );

            let found = validator.validate(argument)?;

            if found.is_empty() {
                tracing::debug!(
                    code = messages::VALIDATION_PASSED,
                    method = %method,
                    parameter = parameter.name(),
                    "{}",
                    messages::render(messages::VALIDATION_PASSED, &[&parameter.name(), &method])
                );
            } else {
                let count = self.settings.report_violation_count.then_some(found.len());
                tracing::debug!(
                    code = messages::VIOLATIONS_FOUND,
                    method = %method,
                    parameter = parameter.name(),
                    count,
                    "{}",
                    messages::render_violations_found(parameter.name(), &method, count)
                );
            }

            violations.extend(found);
        }

        Ok(Some(ConstraintViolations::new(violations)))
    }

    /// Validate and decide whether the invocation may proceed
    pub fn intercept(
        &self,
        metadata: &InvocationMetadata,
        args: &mut InvocationArguments,
    ) -> Result<ValidationOutcome> {
        let Some(violations) = self.collect_violations(metadata, args)? else {
            return Ok(ValidationOutcome::Skipped);
        };

        let method = metadata.qualified_name();
        match Self::index_of_violations(metadata) {
            Some(index) => {
                let count = violations.len();
                args.put(index, Argument::new(violations))?;
                tracing::debug!(
                    code = messages::CARRIER_INJECTED,
                    method = %method,
                    index,
                    count,
                    "{}",
                    messages::render(messages::CARRIER_INJECTED, &[&count, &index, &method])
                );
                Ok(ValidationOutcome::Injected { index, count })
            }
            None if violations.is_empty() => Ok(ValidationOutcome::Passed),
            None => {
                tracing::warn!(
                    code = messages::VIOLATIONS_ESCALATED,
                    method = %method,
                    count = violations.len(),
                    "{}",
                    messages::render(messages::VIOLATIONS_ESCALATED, &[&method, &violations.len()])
                );
                Err(Error::ConstraintViolation(ConstraintViolationError::new(
                    violations,
                )))
            }
        }
    }

    fn render_argument(&self, argument: Option<&Argument>) -> String {
        let Some(argument) = argument else {
            return "null".to_string();
        };
        let rendered = argument.render();
        let rendered = if self.settings.redact_values {
            redaction::redact_sensitive(&rendered)
        } else {
            rendered
        };
        redaction::truncate(&rendered, self.settings.max_logged_value_len)
    }
}

impl Default for ValidationInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationInterceptor")
            .field("settings", &self.settings)
            .field("catalog", &self.catalog)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

impl InvocationProcessor for ValidationInterceptor {
    fn name(&self) -> &str {
        PROCESSOR_NAME
    }

    fn on_invoke(
        &self,
        metadata: &InvocationMetadata,
        args: &mut InvocationArguments,
    ) -> argus_core::Result<()> {
        self.intercept(metadata, args)
            .map(|_| ())
            .map_err(|e| e.into_interruption(PROCESSOR_NAME))
    }
}

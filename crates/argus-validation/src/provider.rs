//! Validator acquisition
//!
//! The interceptor asks a [`ValidatorProvider`] for the validator of each
//! invocation. Hosts with their own container, and tests substituting a stub,
//! configure a provider; otherwise [`DefaultValidatorFactory`] constructs a
//! [`DefaultValidator`].

use crate::error::Result;
use crate::validator::{ConstraintValidator, DefaultValidator};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a validator instance
pub type SharedValidator = Arc<dyn ConstraintValidator>;

/// Supplies the validator used for one invocation
pub trait ValidatorProvider: Send + Sync {
    fn provide(&self) -> Result<SharedValidator>;
}

impl<F> ValidatorProvider for F
where
    F: Fn() -> Result<SharedValidator> + Send + Sync,
{
    fn provide(&self) -> Result<SharedValidator> {
        self()
    }
}

/// Constructs a fresh [`DefaultValidator`] on every request
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidatorFactory;

impl ValidatorProvider for DefaultValidatorFactory {
    fn provide(&self) -> Result<SharedValidator> {
        Ok(Arc::new(DefaultValidator::new()))
    }
}

/// Hands out one pre-built validator instance
#[derive(Clone)]
pub struct InstanceProvider {
    validator: SharedValidator,
}

impl InstanceProvider {
    pub fn new(validator: SharedValidator) -> Self {
        Self { validator }
    }
}

impl ValidatorProvider for InstanceProvider {
    fn provide(&self) -> Result<SharedValidator> {
        Ok(Arc::clone(&self.validator))
    }
}

impl fmt::Debug for InstanceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceProvider").finish_non_exhaustive()
    }
}

//! Validator seam and the default validator backed by the `validator` crate
//!
//! The plugin never checks constraints itself. A [`ConstraintValidator`] receives
//! one argument slot and reports the violations found in it. The
//! [`DefaultValidator`] delegates to [`validator::Validate`] through a
//! [`Constraints`] checker that [`validated`] attaches to the argument, and
//! flattens the engine's nested error tree into an ordered list.
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::violation::ConstraintViolation;
use argus_core::{Argument, InvocationArguments};
use std::any::Any;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Checks a single argument against its constraints
pub trait ConstraintValidator: Send + Sync {
    /// Validate one argument slot; `None` is an empty (null) slot
    ///
    /// Returns every violation found, in a stable order. Errors mean the value
    /// could not be checked at all and are propagated to the host unchanged.
    /// The default validator refuses values that were not wrapped with
    /// [`validated`], so an unchecked value never passes as valid.
    fn validate(&self, argument: Option<&Argument>) -> Result<Vec<ConstraintViolation>>;
}

impl<F> ConstraintValidator for F
where
    F: Fn(Option<&Argument>) -> Result<Vec<ConstraintViolation>> + Send + Sync,
{
    fn validate(&self, argument: Option<&Argument>) -> Result<Vec<ConstraintViolation>> {
        self(argument)
    }
}

/// Type-erased entry point into [`Validate::validate`] for one argument type
#[derive(Clone, Copy)]
pub struct Constraints {
    type_name: &'static str,
    check: fn(&dyn Any) -> Option<std::result::Result<(), ValidationErrors>>,
}

impl Constraints {
    /// Checker for values of type `T`
    pub fn of<T: Validate + Any>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            check: check_as::<T>,
        }
    }

    /// Run the engine; `None` when `value` is not of the checker's type
    pub fn check(&self, value: &dyn Any) -> Option<std::result::Result<(), ValidationErrors>> {
        (self.check)(value)
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constraints").field(&self.type_name).finish()
    }
}

fn check_as<T: Validate + Any>(value: &dyn Any) -> Option<std::result::Result<(), ValidationErrors>> {
    value.downcast_ref::<T>().map(|v| v.validate())
}

/// Wrap a value whose constraints the default validator can check
pub fn validated<T>(value: T) -> Argument
where
    T: Validate + Any + fmt::Debug + Send + Sync,
{
    Argument::new(value).with_extension(Constraints::of::<T>())
}

/// Builder helpers for argument lists holding validated values
pub trait ValidatedArguments {
    /// Append a slot whose value carries its constraint checker
    fn with_validated<T>(self, value: T) -> Self
    where
        T: Validate + Any + fmt::Debug + Send + Sync;
}

impl ValidatedArguments for InvocationArguments {
    fn with_validated<T>(self, value: T) -> Self
    where
        T: Validate + Any + fmt::Debug + Send + Sync,
    {
        self.with_argument(validated(value))
    }
}

/// Validator used when no provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl DefaultValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ConstraintValidator for DefaultValidator {
    fn validate(&self, argument: Option<&Argument>) -> Result<Vec<ConstraintViolation>> {
        let argument = argument.ok_or_else(|| Error::validator("cannot validate an empty argument"))?;

        // A flagged value without a checker cannot be vouched for
        let Some(constraints) = argument.extension::<Constraints>() else {
            return Err(Error::validator(format!(
                "argument of type {} carries no constraint checker; wrap it with `validated`",
                argument.type_name()
            )));
        };

        match constraints.check(argument.as_any()) {
            Some(Ok(())) => Ok(Vec::new()),
            Some(Err(errors)) => Ok(flatten_errors(&errors)),
            None => Err(Error::validator(format!(
                "constraint checker for {:?} cannot check a value of type {}",
                constraints,
                argument.type_name()
            ))),
        }
    }
}

/// Flatten the engine's error tree into violations ordered by path
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();
    flatten_into(errors, "", &mut violations);
    violations
}

fn flatten_into(errors: &ValidationErrors, prefix: &str, out: &mut Vec<ConstraintViolation>) {
    // The engine stores fields in a hash map
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = join_path(prefix, &field.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| to_violation(&path, e)));
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_into(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn to_violation(path: &str, error: &ValidationError) -> ConstraintViolation {
    let code = error.code.to_string();
    let message = match &error.message {
        Some(message) => message.to_string(),
        None => fallback_message(path, &code),
    };

    let mut violation = ConstraintViolation::new(path, code, message);
    for (name, value) in &error.params {
        violation = violation.with_param(name.to_string(), value.clone());
    }
    violation
}

fn fallback_message(path: &str, code: &str) -> String {
    match code {
        "required" => format!("{} is required", path),
        "range" => format!("{} is out of range", path),
        "length" => format!("{} has an invalid length", path),
        "email" => format!("{} is not a valid email address", path),
        "url" => format!("{} is not a valid URL", path),
        _ => format!("{} failed the '{}' constraint", path, code),
    }
}

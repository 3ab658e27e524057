//! Constraint violations and the read-only carrier that transports them
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One failed constraint check, as reported by the constraint engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Location of the failing value inside the validated argument
    pub path: String,
    /// Code of the constraint that failed, e.g. `required` or `range`
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Parameters reported with the failure, e.g. `min` or `value`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl ConstraintViolation {
    /// Create a violation without parameters
    pub fn new<P, C, M>(path: P, code: C, message: M) -> Self
    where
        P: Into<String>,
        C: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a reported parameter
    pub fn with_param(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// A reported parameter by name
    pub fn param(&self, name: &str) -> Option<&serde_json::Value> {
        self.params.get(name)
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.code)
    }
}

/// Immutable, ordered collection of violations found during one invocation
///
/// This is the value injected into a method's carrier-typed parameter or
/// carried by [`ConstraintViolationError`](crate::ConstraintViolationError).
/// Clones share the same storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolations {
    violations: Arc<[ConstraintViolation]>,
}

impl ConstraintViolations {
    /// Freeze a list of violations
    pub fn new(violations: Vec<ConstraintViolation>) -> Self {
        Self {
            violations: violations.into(),
        }
    }

    /// Every violation, in detection order
    pub fn all(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    /// Violations reported for a given path
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ConstraintViolation> {
        self.violations.iter().filter(move |v| v.path == path)
    }
}

impl Default for ConstraintViolations {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<ConstraintViolation>> for ConstraintViolations {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self::new(violations)
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolations {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConstraintViolations {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} constraint violation(s)", self.len())?;
        for violation in self.iter() {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl Serialize for ConstraintViolations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.all().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConstraintViolations {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ConstraintViolation>::deserialize(deserializer).map(Self::new)
    }
}

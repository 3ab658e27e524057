//! Invocation metadata describing the target method of a dispatch
//!
//! A host describes each entry point with an [`InvocationMetadata`]: the declaring
//! type, the method name, and one [`ParameterDescriptor`] per declared parameter.
//! Descriptors carry the parameter's Rust type identity and the annotations the
//! method author attached to it. Processors read these descriptors instead of
//! reflecting over live methods.

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;

/// A named marker attached to a declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotation(String);

impl Annotation {
    /// Create an annotation from its fully qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The fully qualified annotation name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<&str> for Annotation {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Annotation {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Declaration of a single method parameter
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    annotations: Vec<Annotation>,
}

impl ParameterDescriptor {
    /// Describe a parameter of type `T`
    pub fn of<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation to this parameter
    pub fn annotated(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether the parameter is declared with exactly the type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Look up an annotation by value
    pub fn find_annotation(&self, annotation: &Annotation) -> Option<&Annotation> {
        self.annotations.iter().find(|a| *a == annotation)
    }

    pub fn has_annotation(&self, annotation: &Annotation) -> bool {
        self.find_annotation(annotation).is_some()
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{} ", annotation)?;
        }
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

/// Read-only description of the method an invocation targets
#[derive(Debug, Clone)]
pub struct InvocationMetadata {
    declaring_type: String,
    method_name: String,
    parameters: Vec<ParameterDescriptor>,
}

impl InvocationMetadata {
    /// Create metadata for a method without parameters
    pub fn new(declaring_type: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method_name: method_name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter declaration
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// `Type::method` form used in diagnostics
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.declaring_type, self.method_name)
    }

    /// Position of the first parameter declared with type `T`
    pub fn position_of<T: Any>(&self) -> Option<usize> {
        self.parameters.iter().position(|p| p.is::<T>())
    }
}

impl fmt::Display for InvocationMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.qualified_name())?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ")")
    }
}

//! Argument values for a pending invocation
//!
//! Arguments are type-erased so a single pipeline can dispatch any entry point.
//! Each [`Argument`] remembers its type name and debug rendering, and can carry
//! typed extensions that processors use to attach capabilities to a value
//! (the validation plugin stores its constraint checker there).

use crate::error::{Error, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Object-safe view over an argument value
trait ArgumentValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
    fn type_name(&self) -> &'static str;
}

impl<T> ArgumentValue for T
where
    T: Any + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A single type-erased argument value
pub struct Argument {
    value: Box<dyn ArgumentValue>,
    extensions: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Argument {
    /// Wrap a value as an argument
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Self {
            value: Box::new(value),
            extensions: HashMap::new(),
        }
    }

    /// Attach a typed extension, replacing any previous one of the same type
    pub fn with_extension<E>(mut self, extension: E) -> Self
    where
        E: Any + Send + Sync,
    {
        self.extensions.insert(TypeId::of::<E>(), Box::new(extension));
        self
    }

    /// Typed extension previously attached with [`Argument::with_extension`]
    pub fn extension<E: Any>(&self) -> Option<&E> {
        self.extensions
            .get(&TypeId::of::<E>())
            .and_then(|e| e.downcast_ref::<E>())
    }

    // Deref explicitly: the blanket impl also covers the box itself.
    fn inner(&self) -> &dyn ArgumentValue {
        &*self.value
    }

    /// Type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.inner().type_name()
    }

    /// Whether the wrapped value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner().as_any().is::<T>()
    }

    /// Borrow the wrapped value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner().as_any().downcast_ref::<T>()
    }

    /// The wrapped value as [`Any`], for checkers stored in extensions
    pub fn as_any(&self) -> &dyn Any {
        self.inner().as_any()
    }

    /// Take the wrapped value out as `T`, giving the argument back on mismatch
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.value.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Debug rendering of the wrapped value
    pub fn render(&self) -> String {
        format!("{:?}", self.inner())
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("type", &self.type_name())
            .field("value", &self.inner())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// Ordered argument slots for the call about to execute
///
/// A slot is `None` when the host has no value for it (a null argument).
/// Slots can only be replaced by index, never inserted or removed, so the
/// positional correspondence with the method's parameters is preserved.
#[derive(Debug, Default)]
pub struct InvocationArguments {
    slots: Vec<Option<Argument>>,
}

impl InvocationArguments {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a value slot
    pub fn with<T>(mut self, value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        self.slots.push(Some(Argument::new(value)));
        self
    }

    /// Append a prepared argument slot
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.slots.push(Some(argument));
        self
    }

    /// Append an empty slot
    pub fn with_null(mut self) -> Self {
        self.slots.push(None);
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Argument at `index`; `None` for empty or missing slots
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Argument value at `index` borrowed as `T`
    pub fn value<T: Any>(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(|a| a.downcast_ref::<T>())
    }

    /// Replace the slot at `index`, returning the previous argument
    pub fn put(&mut self, index: usize, argument: Argument) -> Result<Option<Argument>> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(Error::ArgumentIndex { index, len })?;
        Ok(slot.replace(argument))
    }

    /// Take the argument at `index` out of its slot, leaving it empty
    pub fn take(&mut self, index: usize) -> Option<Argument> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Iterate over the slots in positional order
    pub fn iter(&self) -> impl Iterator<Item = Option<&Argument>> {
        self.slots.iter().map(Option::as_ref)
    }
}

impl From<Vec<Option<Argument>>> for InvocationArguments {
    fn from(slots: Vec<Option<Argument>>) -> Self {
        Self { slots }
    }
}

impl FromIterator<Option<Argument>> for InvocationArguments {
    fn from_iter<I: IntoIterator<Item = Option<Argument>>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

//! Recognition of parameters that require validation
//!
//! A parameter is flagged when its descriptor carries the plugin's own
//! [`Marker::AssertValid`] annotation, or the generic [`Marker::Valid`]
//! annotation when the running environment provides it. Availability of the
//! generic marker is a capability query on the [`MarkerCatalog`]; an absent
//! marker simply never matches.

use argus_core::{Annotation, ParameterDescriptor};
use std::collections::BTreeSet;
use std::fmt;

/// Annotation name of the plugin's own marker
pub const ASSERT_VALID: &str = "argus.validation.AssertValid";

/// Annotation name of the generic cross-library marker
pub const VALID: &str = "validation.Valid";

/// Markers the plugin understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    /// Library-specific "assert valid" marker, always available
    AssertValid,
    /// Generic "valid" marker, available only when the environment provides it
    Valid,
}

impl Marker {
    /// Fully qualified annotation name
    pub fn name(self) -> &'static str {
        match self {
            Marker::AssertValid => ASSERT_VALID,
            Marker::Valid => VALID,
        }
    }

    /// The annotation to attach to a [`ParameterDescriptor`]
    pub fn annotation(self) -> Annotation {
        Annotation::new(self.name())
    }

    /// Resolve a marker from its annotation name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ASSERT_VALID => Some(Marker::AssertValid),
            VALID => Some(Marker::Valid),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

impl From<Marker> for Annotation {
    fn from(marker: Marker) -> Self {
        marker.annotation()
    }
}

/// Marker kinds available in the running environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCatalog {
    available: BTreeSet<Marker>,
}

impl MarkerCatalog {
    /// Catalog with both markers available
    pub fn new() -> Self {
        Self::with_generic_marker(true)
    }

    /// Catalog with only the library marker available
    pub fn library_only() -> Self {
        Self::with_generic_marker(false)
    }

    /// Catalog with the generic marker present or absent
    pub fn with_generic_marker(present: bool) -> Self {
        let mut available = BTreeSet::from([Marker::AssertValid]);
        if present {
            available.insert(Marker::Valid);
        }
        Self { available }
    }

    /// Look a marker up by annotation name; `None` when unknown or unavailable
    pub fn probe(&self, name: &str) -> Option<Marker> {
        Marker::from_name(name).filter(|marker| self.available.contains(marker))
    }

    /// The generic marker, if the environment provides it
    pub fn generic_marker(&self) -> Option<Marker> {
        self.probe(VALID)
    }
}

impl Default for MarkerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a declared parameter must be validated before the call
pub fn requires_validation(parameter: &ParameterDescriptor, catalog: &MarkerCatalog) -> bool {
    if parameter.has_annotation(&Marker::AssertValid.annotation()) {
        return true;
    }
    catalog
        .generic_marker()
        .is_some_and(|marker| parameter.has_annotation(&marker.annotation()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Form;

    #[test]
    fn test_assert_valid_always_flags() {
        let parameter = ParameterDescriptor::of::<Form>("form").annotated(Marker::AssertValid);
        assert!(requires_validation(&parameter, &MarkerCatalog::new()));
        assert!(requires_validation(&parameter, &MarkerCatalog::library_only()));
    }

    #[test]
    fn test_generic_marker_depends_on_catalog() {
        let parameter = ParameterDescriptor::of::<Form>("form").annotated(Marker::Valid);
        assert!(requires_validation(&parameter, &MarkerCatalog::new()));
        assert!(!requires_validation(&parameter, &MarkerCatalog::library_only()));
    }

    #[test]
    fn test_unmarked_and_foreign_annotations() {
        let plain = ParameterDescriptor::of::<Form>("form");
        let foreign = ParameterDescriptor::of::<Form>("form").annotated("web.RequestBody");
        let catalog = MarkerCatalog::new();
        assert!(!requires_validation(&plain, &catalog));
        assert!(!requires_validation(&foreign, &catalog));
    }

    #[test]
    fn test_probe_of_missing_marker_is_none() {
        let catalog = MarkerCatalog::library_only();
        assert_eq!(catalog.probe(VALID), None);
        assert_eq!(catalog.probe("does.not.Exist"), None);
        assert_eq!(catalog.probe(ASSERT_VALID), Some(Marker::AssertValid));
    }
}

//! Property-based tests for violation aggregation
//!
//! Whatever the mix of flagged and unflagged parameters, the carrier holds
//! exactly the violations reported for the flagged ones, in parameter order.

use argus_core::{Argument, InvocationArguments, InvocationMetadata, ParameterDescriptor};
use argus_validation::{
    ConstraintViolation, ConstraintViolations, Marker, Result, SharedValidator,
    ValidationInterceptor, ValidationOutcome,
};
use proptest::prelude::*;
use std::sync::Arc;

/// Argument whose value tells the stub validator how many violations to report
#[derive(Debug)]
struct Reported(usize);

fn stub_validator(argument: Option<&Argument>) -> Result<Vec<ConstraintViolation>> {
    let (slot, count) = argument
        .and_then(|a| a.downcast_ref::<(usize, Reported)>())
        .map(|(slot, reported)| (*slot, reported.0))
        .unwrap_or((usize::MAX, 0));

    Ok((0..count)
        .map(|n| ConstraintViolation::new(format!("slot{}", slot), format!("c{}", n), "stub"))
        .collect())
}

/// Strategy for one parameter: marker (if any) and reported violation count
fn parameter_strategy() -> impl Strategy<Value = (Option<Marker>, usize)> {
    (
        prop_oneof![
            Just(None),
            Just(Some(Marker::AssertValid)),
            Just(Some(Marker::Valid)),
        ],
        0usize..4,
    )
}

proptest! {
    #[test]
    fn prop_carrier_holds_exactly_flagged_violations(
        parameters in proptest::collection::vec(parameter_strategy(), 1..8)
    ) {
        let mut metadata = InvocationMetadata::new("Prop", "invoke");
        let mut args = InvocationArguments::new();
        let mut expected = Vec::new();

        for (slot, (marker, count)) in parameters.iter().enumerate() {
            let mut descriptor = ParameterDescriptor::of::<(usize, Reported)>(format!("p{}", slot));
            if let Some(marker) = marker {
                descriptor = descriptor.annotated(*marker);
                expected.extend((0..*count).map(|n| (format!("slot{}", slot), format!("c{}", n))));
            }
            metadata = metadata.parameter(descriptor);
            args = args.with((slot, Reported(*count)));
        }
        let carrier_index = parameters.len();
        metadata = metadata.parameter(ParameterDescriptor::of::<ConstraintViolations>("violations"));
        args = args.with_null();

        let interceptor = ValidationInterceptor::new()
            .with_validator_factory(|| Ok(Arc::new(stub_validator) as SharedValidator));
        let outcome = interceptor.intercept(&metadata, &mut args).unwrap();

        let carrier = args.value::<ConstraintViolations>(carrier_index);
        let found: Vec<(String, String)> = carrier
            .map(|c| c.iter().map(|v| (v.path.clone(), v.code.clone())).collect())
            .unwrap_or_default();

        if parameters.iter().all(|(marker, _)| marker.is_none()) {
            prop_assert_eq!(outcome, ValidationOutcome::Skipped);
            prop_assert!(carrier.is_none());
        } else {
            prop_assert_eq!(
                outcome,
                ValidationOutcome::Injected { index: carrier_index, count: expected.len() }
            );
            prop_assert_eq!(found, expected);
        }
    }

    #[test]
    fn prop_unflagged_arguments_are_never_touched(count in 1usize..6) {
        let mut metadata = InvocationMetadata::new("Prop", "plain");
        let mut args = InvocationArguments::new();
        for slot in 0..count {
            metadata = metadata.parameter(ParameterDescriptor::of::<usize>(format!("p{}", slot)));
            args = args.with(slot);
        }

        let outcome = ValidationInterceptor::new().intercept(&metadata, &mut args).unwrap();

        prop_assert_eq!(outcome, ValidationOutcome::Skipped);
        for slot in 0..count {
            prop_assert_eq!(args.value::<usize>(slot), Some(&slot));
        }
    }
}

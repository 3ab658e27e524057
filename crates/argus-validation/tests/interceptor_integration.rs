//! End-to-end tests of the validation plugin through the host dispatch pipeline


use argus_core::{
    Argument, InvocationArguments, InvocationMetadata, Modules, ModulesBuilder,
    ParameterDescriptor,
};
use argus_validation::{
    ConstraintViolation, ConstraintViolationError, ConstraintViolations, Error, InstanceProvider,
    Marker, MarkerCatalog, Result, SharedValidator, ValidatedArguments, ValidationInterceptor,
    ValidationOutcome, ValidationPluginConfig, ValidationSettings,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_support::*;

fn modules_with(config: ValidationPluginConfig) -> Modules {
    ModulesBuilder::new().apply(&config).build()
}

fn default_modules() -> Modules {
    modules_with(ValidationPluginConfig::new())
}

#[test]
fn test_unflagged_parameters_skip_validation() {
    let acquired = Arc::new(AtomicUsize::new(0));
    let interceptor =
        ValidationInterceptor::new().with_validator_factory(counting_provider(acquired.clone()));

    let metadata = InvocationMetadata::new("EntryPoint", "plain")
        .parameter(ParameterDescriptor::of::<Bean>("bean"))
        .parameter(ParameterDescriptor::of::<ConstraintViolations>("violations"));
    let mut args = bean_with_carrier(invalid_bean());

    let outcome = interceptor.intercept(&metadata, &mut args).unwrap();

    assert_eq!(outcome, ValidationOutcome::Skipped);
    assert_eq!(acquired.load(Ordering::SeqCst), 0);
    assert!(args.get(1).is_none());
}

#[test]
fn test_passing_arguments_without_carrier_proceed() {
    let ran = default_modules()
        .dispatch(
            &do_something(),
            InvocationArguments::new().with_validated(valid_bean()),
            |_| true,
        )
        .unwrap();
    assert!(ran);
}

#[test]
fn test_passing_arguments_receive_empty_carrier() {
    let count = default_modules()
        .dispatch(&do_anything(), bean_with_carrier(valid_bean()), |args| {
            args.value::<ConstraintViolations>(1).map(|v| v.len())
        })
        .unwrap();
    assert_eq!(count, Some(0));
}

#[test]
fn test_failing_bean_with_carrier_runs_target() {
    let violations = default_modules()
        .dispatch(&do_anything(), bean_with_carrier(invalid_bean()), |mut args| {
            args.take(1)
                .and_then(|carrier| carrier.downcast::<ConstraintViolations>().ok())
        })
        .unwrap()
        .expect("carrier injected at index 1");

    assert_eq!(violations.len(), 1);
    assert_eq!(
        paths_and_codes(&violations),
        vec![("name".to_string(), "required".to_string())]
    );
}

#[test]
fn test_failing_bean_without_carrier_aborts() {
    let mut executed = false;
    let err = default_modules()
        .dispatch(
            &do_something(),
            InvocationArguments::new().with_validated(invalid_bean()),
            |_| executed = true,
        )
        .unwrap_err();

    assert!(!executed);
    match &err {
        argus_core::Error::Interrupted { processor, .. } => {
            assert_eq!(processor, argus_validation::PROCESSOR_NAME)
        }
        other => panic!("expected an interruption, got {:?}", other),
    }
    let violation = err
        .interruption::<ConstraintViolationError>()
        .expect("violation error as interruption source");
    assert_eq!(violation.violations().len(), 1);
    assert_eq!(violation.violations().all()[0].path, "name");
}

#[test]
fn test_intercept_returns_violation_error_directly() {
    let interceptor = ValidationInterceptor::new();
    let mut args = InvocationArguments::new().with_validated(invalid_bean());

    let err = interceptor.intercept(&do_something(), &mut args).unwrap_err();
    assert_eq!(err.violations().map(|v| v.len()), Some(1));
}

#[test]
fn test_substituted_validator_yields_empty_carrier() {
    let config = ValidationPluginConfig::new()
        .with_provider(Arc::new(InstanceProvider::new(accepting_validator())));

    let carrier = modules_with(config)
        .dispatch(&do_anything(), bean_with_carrier(invalid_bean()), |mut args| {
            args.take(1)
                .and_then(|carrier| carrier.downcast::<ConstraintViolations>().ok())
        })
        .unwrap()
        .expect("carrier injected");

    assert!(carrier.is_empty());
}

#[test]
fn test_violations_aggregate_in_parameter_order() {
    let metadata = InvocationMetadata::new("EntryPoint", "transfer")
        .parameter(ParameterDescriptor::of::<Bean>("from").annotated(Marker::AssertValid))
        .parameter(ParameterDescriptor::of::<Bean>("unchecked"))
        .parameter(ParameterDescriptor::of::<Bean>("to").annotated(Marker::Valid))
        .parameter(ParameterDescriptor::of::<ConstraintViolations>("violations"));
    let mut args = InvocationArguments::new()
        .with_validated(Bean {
            name: Some("from".to_string()),
            age: -1,
        })
        .with_validated(invalid_bean())
        .with_validated(Bean { name: None, age: -2 })
        .with_null();

    let outcome = ValidationInterceptor::new()
        .intercept(&metadata, &mut args)
        .unwrap();

    assert_eq!(outcome, ValidationOutcome::Injected { index: 3, count: 3 });
    let carrier = args.value::<ConstraintViolations>(3).unwrap();
    assert_eq!(
        paths_and_codes(carrier),
        vec![
            ("age".to_string(), "range".to_string()),
            ("age".to_string(), "range".to_string()),
            ("name".to_string(), "required".to_string()),
        ]
    );
}

#[test]
fn test_generic_marker_depends_on_catalog() {
    let metadata = InvocationMetadata::new("EntryPoint", "generic")
        .parameter(ParameterDescriptor::of::<Bean>("bean").annotated(Marker::Valid));

    let with_generic = ValidationInterceptor::new();
    let mut args = InvocationArguments::new().with_validated(invalid_bean());
    assert!(with_generic.intercept(&metadata, &mut args).is_err());

    let without_generic = ValidationInterceptor::new().with_catalog(MarkerCatalog::library_only());
    let mut args = InvocationArguments::new().with_validated(invalid_bean());
    assert_eq!(
        without_generic.intercept(&metadata, &mut args).unwrap(),
        ValidationOutcome::Skipped
    );
}

#[test]
fn test_first_carrier_parameter_wins() {
    let metadata = do_anything()
        .parameter(ParameterDescriptor::of::<ConstraintViolations>("more_violations"));
    let mut args = bean_with_carrier(invalid_bean()).with_null();

    let outcome = ValidationInterceptor::new()
        .intercept(&metadata, &mut args)
        .unwrap();

    assert_eq!(outcome, ValidationOutcome::Injected { index: 1, count: 1 });
    assert!(args.get(2).is_none());
}

#[test]
fn test_provider_failure_propagates() {
    let config = ValidationPluginConfig::new().with_provider(Arc::new(
        || -> Result<SharedValidator> { Err(Error::provider("container offline")) },
    ));

    let err = modules_with(config)
        .dispatch(&do_anything(), bean_with_carrier(valid_bean()), |_| ())
        .unwrap_err();

    let source = err
        .interruption::<Error>()
        .expect("plugin error as interruption source");
    assert!(matches!(source, Error::Provider { .. }));
    assert!(err.interruption::<ConstraintViolationError>().is_none());
}

#[test]
fn test_validator_failure_propagates() {
    let failing = |_: Option<&Argument>| -> Result<Vec<ConstraintViolation>> {
        Err(Error::validator("engine unavailable"))
    };
    let interceptor = ValidationInterceptor::new()
        .with_provider(Arc::new(InstanceProvider::new(Arc::new(failing))));
    let mut args = bean_with_carrier(valid_bean());

    let err = interceptor.intercept(&do_anything(), &mut args).unwrap_err();
    assert!(matches!(err, Error::Validator { .. }));
    assert!(args.get(1).is_none());
}

#[test]
fn test_null_flagged_argument_is_rejected_by_default_validator() {
    let mut args = InvocationArguments::new().with_null().with_null();

    let err = ValidationInterceptor::new()
        .intercept(&do_anything(), &mut args)
        .unwrap_err();
    assert!(matches!(err, Error::Validator { .. }));
}

#[test]
fn test_argument_count_mismatch_is_rejected_before_processors() {
    let err = default_modules()
        .dispatch(
            &do_anything(),
            InvocationArguments::new().with_validated(invalid_bean()),
            |_| (),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        argus_core::Error::ArgumentMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn test_settings_flow_through_plugin() {
    let settings = ValidationSettings {
        recognize_generic_marker: false,
        ..ValidationSettings::default()
    };
    let metadata = InvocationMetadata::new("EntryPoint", "generic")
        .parameter(ParameterDescriptor::of::<Bean>("bean").annotated(Marker::Valid));

    let ran = modules_with(ValidationPluginConfig::new().with_settings(settings))
        .dispatch(
            &metadata,
            InvocationArguments::new().with_validated(invalid_bean()),
            |_| true,
        )
        .unwrap();
    assert!(ran);
}

#[test]
fn test_interceptor_registered_by_type() {
    let modules = ModulesBuilder::new()
        .add_invocation_processor_type::<ValidationInterceptor>()
        .build();

    assert_eq!(modules.processor_names(), vec![argus_validation::PROCESSOR_NAME]);
    assert!(modules
        .dispatch(
            &do_something(),
            InvocationArguments::new().with_validated(invalid_bean()),
            |_| (),
        )
        .is_err());
}

#[test]
fn test_flagged_bean_without_checker_never_passes_silently() {
    let mut carrier_target_ran = false;
    let err = default_modules()
        .dispatch(
            &do_anything(),
            InvocationArguments::new().with(invalid_bean()).with_null(),
            |_| carrier_target_ran = true,
        )
        .unwrap_err();
    assert!(!carrier_target_ran);
    assert!(matches!(
        err.interruption::<Error>(),
        Some(Error::Validator { .. })
    ));

    let mut target_ran = false;
    let err = default_modules()
        .dispatch(
            &do_something(),
            InvocationArguments::new().with(invalid_bean()),
            |_| target_ran = true,
        )
        .unwrap_err();
    assert!(!target_ran);
    assert!(matches!(err, argus_core::Error::Interrupted { .. }));
}

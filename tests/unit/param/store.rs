use super::*;

fn specs() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("fold", ParamKind::Completion, None, RangePolicy::Reject).unwrap(),
        ParamSpec::new(
            "width",
            ParamKind::Length,
            Some(Value::Scalar(50.0)),
            RangePolicy::Reject,
        )
        .unwrap(),
    ]
}

#[test]
fn spec_validates_the_declared_default() {
    let err = ParamSpec::new(
        "fold",
        ParamKind::Completion,
        Some(Value::Scalar(2.0)),
        RangePolicy::Reject,
    )
    .unwrap_err();
    assert!(matches!(err, HoloformError::Range(_)));
    assert!(err.to_string().contains("default for `fold`"));

    let clamped = ParamSpec::new(
        "fold",
        ParamKind::Completion,
        Some(Value::Scalar(2.0)),
        RangePolicy::Clamp,
    )
    .unwrap();
    assert_eq!(clamped.default, Value::Scalar(1.0));
}

#[test]
fn defaults_fill_every_slot() {
    let specs = specs();
    let store = ParamStore::from_defaults(&specs);
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
    assert_eq!(store.read(ParamId(0)).unwrap(), Value::Scalar(0.0));
    assert_eq!(store.read(ParamId(1)).unwrap(), Value::Scalar(50.0));
}

#[test]
fn write_admits_under_the_given_policy() {
    let specs = specs();
    let mut store = ParamStore::from_defaults(&specs);

    store
        .write(&specs[0], ParamId(0), Value::Scalar(0.25), RangePolicy::Reject)
        .unwrap();
    assert_eq!(store.read(ParamId(0)).unwrap(), Value::Scalar(0.25));

    store
        .write(&specs[0], ParamId(0), Value::Scalar(7.0), RangePolicy::Clamp)
        .unwrap();
    assert_eq!(store.read(ParamId(0)).unwrap(), Value::Scalar(1.0));
}

#[test]
fn rejected_write_keeps_the_previous_value() {
    let specs = specs();
    let mut store = ParamStore::from_defaults(&specs);

    let err = store
        .write(&specs[1], ParamId(1), Value::Scalar(-4.0), RangePolicy::Reject)
        .unwrap_err();
    assert!(err.to_string().contains("parameter `width`"));
    assert_eq!(store.read(ParamId(1)).unwrap(), Value::Scalar(50.0));
}

#[test]
fn out_of_bounds_slots_error() {
    let specs = specs();
    let mut store = ParamStore::from_defaults(&specs);
    assert!(store.read(ParamId(9)).is_err());
    assert!(
        store
            .write(&specs[0], ParamId(9), Value::Scalar(0.0), RangePolicy::Reject)
            .is_err()
    );
}

use super::*;

#[test]
fn kind_defaults_match_declared_domains() {
    assert_eq!(ParamKind::Length.default_value(), Value::Scalar(100.0));
    assert_eq!(ParamKind::Angle.default_value(), Value::Scalar(0.0));
    assert_eq!(ParamKind::Bipolar.default_value(), Value::Scalar(0.0));
    assert_eq!(ParamKind::Completion.default_value(), Value::Scalar(0.0));
    assert_eq!(ParamKind::Color.default_value(), Value::Color(Color::WHITE));
    assert_eq!(ParamKind::Integer.default_value(), Value::Int(0));
    assert_eq!(ParamKind::Bool.default_value(), Value::Bool(false));

    for kind in [
        ParamKind::Length,
        ParamKind::Angle,
        ParamKind::Bipolar,
        ParamKind::Completion,
        ParamKind::Color,
        ParamKind::Integer,
        ParamKind::Bool,
    ] {
        assert!(kind.admit(kind.default_value(), RangePolicy::Reject).is_ok());
    }
}

#[test]
fn reject_policy_reports_out_of_range() {
    let err = ParamKind::Completion
        .admit(Value::Scalar(1.5), RangePolicy::Reject)
        .unwrap_err();
    assert!(matches!(err, HoloformError::Range(_)));

    assert!(
        ParamKind::Length
            .admit(Value::Scalar(-1.0), RangePolicy::Reject)
            .is_err()
    );
    assert!(
        ParamKind::Bipolar
            .admit(Value::Scalar(-2.0), RangePolicy::Reject)
            .is_err()
    );
}

#[test]
fn clamp_policy_coerces_into_domain() {
    assert_eq!(
        ParamKind::Completion
            .admit(Value::Scalar(1.5), RangePolicy::Clamp)
            .unwrap(),
        Value::Scalar(1.0)
    );
    assert_eq!(
        ParamKind::Length
            .admit(Value::Scalar(-3.0), RangePolicy::Clamp)
            .unwrap(),
        Value::Scalar(0.0)
    );
    assert_eq!(
        ParamKind::Bipolar
            .admit(Value::Scalar(-2.0), RangePolicy::Clamp)
            .unwrap(),
        Value::Scalar(-1.0)
    );
}

#[test]
fn angle_wraps_instead_of_clamping() {
    let admitted = ParamKind::Angle
        .admit(Value::Scalar(TAU + 1.0), RangePolicy::Clamp)
        .unwrap();
    let Value::Scalar(v) = admitted else {
        panic!("angle must stay scalar");
    };
    assert!((v - 1.0).abs() < 1e-12);

    let admitted = ParamKind::Angle
        .admit(Value::Scalar(-1.0), RangePolicy::Clamp)
        .unwrap();
    let Value::Scalar(v) = admitted else {
        panic!("angle must stay scalar");
    };
    assert!((v - (TAU - 1.0)).abs() < 1e-12);

    assert!(
        ParamKind::Angle
            .admit(Value::Scalar(TAU), RangePolicy::Reject)
            .is_err()
    );
}

#[test]
fn color_channels_clamp_per_channel() {
    let admitted = ParamKind::Color
        .admit(Value::Color(Color::new(1.5, -0.5, 0.3)), RangePolicy::Clamp)
        .unwrap();
    assert_eq!(admitted, Value::Color(Color::new(1.0, 0.0, 0.3)));

    assert!(
        ParamKind::Color
            .admit(Value::Color(Color::new(1.5, 0.0, 0.0)), RangePolicy::Reject)
            .is_err()
    );
}

#[test]
fn non_finite_values_are_rejected_under_both_policies() {
    for policy in [RangePolicy::Reject, RangePolicy::Clamp] {
        assert!(ParamKind::Length.admit(Value::Scalar(f64::NAN), policy).is_err());
        assert!(
            ParamKind::Angle
                .admit(Value::Scalar(f64::INFINITY), policy)
                .is_err()
        );
        assert!(
            ParamKind::Color
                .admit(Value::Color(Color::new(f64::NAN, 0.0, 0.0)), policy)
                .is_err()
        );
    }
}

#[test]
fn variant_mismatch_is_a_range_error() {
    let err = ParamKind::Bool
        .admit(Value::Scalar(1.0), RangePolicy::Clamp)
        .unwrap_err();
    assert!(matches!(err, HoloformError::Range(_)));
    assert!(err.to_string().contains("expects a bool"));

    assert!(
        ParamKind::Integer
            .admit(Value::Bool(true), RangePolicy::Reject)
            .is_err()
    );
    assert!(
        ParamKind::Completion
            .admit(Value::Int(1), RangePolicy::Clamp)
            .is_err()
    );
}

use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
    }
}

#[test]
fn progress_outside_the_unit_interval_clamps() {
    for ease in ALL {
        assert_eq!(ease.apply(-0.5), 0.0, "{ease:?} below 0");
        assert_eq!(ease.apply(1.5), 1.0, "{ease:?} above 1");
    }
}

#[test]
fn midpoints_match_the_curve_shapes() {
    assert_eq!(Ease::Linear.apply(0.5), 0.5);
    assert_eq!(Ease::InQuad.apply(0.5), 0.25);
    assert_eq!(Ease::OutQuad.apply(0.5), 0.75);
    assert_eq!(Ease::InOutQuad.apply(0.5), 0.5);
    assert_eq!(Ease::InCubic.apply(0.5), 0.125);
    assert_eq!(Ease::OutCubic.apply(0.5), 0.875);
    assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
}

#[test]
fn in_curves_lag_and_out_curves_lead() {
    for t in [0.1, 0.25, 0.4] {
        assert!(Ease::InQuad.apply(t) < t);
        assert!(Ease::OutQuad.apply(t) > t);
        assert!(Ease::InCubic.apply(t) < Ease::InQuad.apply(t));
        assert!(Ease::OutCubic.apply(t) > Ease::OutQuad.apply(t));
    }
}

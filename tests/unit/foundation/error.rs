use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HoloformError::range("x")
            .to_string()
            .contains("range error:")
    );
    assert!(
        HoloformError::composition_cycle("x")
            .to_string()
            .contains("composition cycle:")
    );
    assert!(
        HoloformError::ambiguous_binding("x")
            .to_string()
            .contains("ambiguous binding:")
    );
    assert!(
        HoloformError::unresolved_reference("x")
            .to_string()
            .contains("unresolved reference:")
    );
    assert!(
        HoloformError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        HoloformError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        HoloformError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        HoloformError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HoloformError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

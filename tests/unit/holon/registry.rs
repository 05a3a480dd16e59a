use super::*;

fn panel_primitive() -> PrimitiveSpec {
    PrimitiveSpec::new("panel")
        .property("angle", ParamKind::Angle)
        .property_with_default("width", ParamKind::Length, Value::Scalar(40.0))
        .ability("shading", "tint", ParamKind::Color)
}

#[test]
fn primitives_register_their_properties() {
    let mut registry = DefinitionRegistry::new();
    let id = registry.primitive(panel_primitive()).unwrap();

    let def = registry.get(id).unwrap();
    assert_eq!(def.kind(), DefKind::Primitive);
    assert_eq!(def.params().len(), 3);
    assert_eq!(def.params()[1].default, Value::Scalar(40.0));
    assert_eq!(def.params()[2].group.as_deref(), Some("shading"));
    assert!(def.parts().is_empty());
    assert_eq!(registry.find("panel"), Some(id));
}

#[test]
fn primitive_validation_names_the_definition() {
    let mut registry = DefinitionRegistry::new();
    let err = registry
        .primitive(
            PrimitiveSpec::new("panel")
                .property_with_default("width", ParamKind::Length, Value::Scalar(-1.0)),
        )
        .unwrap_err();
    assert!(matches!(err, HoloformError::Range(_)));
    assert!(err.to_string().contains("primitive `panel`"));

    let err = registry
        .primitive(
            PrimitiveSpec::new("panel")
                .property("angle", ParamKind::Angle)
                .property("angle", ParamKind::Length),
        )
        .unwrap_err();
    assert!(err.to_string().contains("duplicate property `angle`"));
}

#[test]
fn names_are_unique_across_declared_and_registered() {
    let mut registry = DefinitionRegistry::new();
    registry.declare("door").unwrap();
    assert!(registry.declare("door").is_err());
    assert!(registry.primitive(PrimitiveSpec::new("door")).is_err());
}

#[test]
fn compose_is_one_shot_and_primitives_stay_leaves() {
    let mut registry = DefinitionRegistry::new();
    let panel = registry.primitive(panel_primitive()).unwrap();
    let door = registry.declare("door").unwrap();

    registry
        .compose(door, |c| {
            c.param("fold", ParamKind::Completion)?;
            c.part("panel", panel)?;
            c.bind("fold", "panel", "angle")?;
            Ok(())
        })
        .unwrap();

    let err = registry.compose(door, |_| Ok(())).unwrap_err();
    assert!(err.to_string().contains("already composed"));

    let err = registry.compose(panel, |_| Ok(())).unwrap_err();
    assert!(err.to_string().contains("cannot be composed"));
}

#[test]
fn uncomposed_definitions_resolve_as_errors_but_count_as_leaves() {
    let mut registry = DefinitionRegistry::new();
    let ghost = registry.declare("ghost").unwrap();
    let err = registry.get(ghost).unwrap_err();
    assert!(err.to_string().contains("never composed"));
    assert_eq!(registry.name_of(ghost).unwrap(), "ghost");

    // composing a holder around the reserved id is fine until the cycle closes
    let holder = registry.declare("holder").unwrap();
    registry
        .compose(holder, |c| {
            c.part("inner", ghost)?;
            Ok(())
        })
        .unwrap();
}

#[test]
fn direct_cycle_fails_the_closing_compose() {
    let mut registry = DefinitionRegistry::new();
    let ouro = registry.declare("ouro").unwrap();
    let err = registry
        .compose(ouro, |c| {
            c.part("tail", ouro)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, HoloformError::CompositionCycle(_)));
    assert!(err.to_string().contains("ouro -> ouro"));

    // the failed compose must not have installed anything
    assert!(registry.get(ouro).is_err());
}

#[test]
fn transitive_cycle_reports_the_definition_path() {
    let mut registry = DefinitionRegistry::new();
    let a = registry.declare("alpha").unwrap();
    let b = registry.declare("beta").unwrap();

    registry
        .compose(b, |c| {
            c.part("inner", a)?;
            Ok(())
        })
        .unwrap();

    let err = registry
        .compose(a, |c| {
            c.part("inner", b)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, HoloformError::CompositionCycle(_)));
    assert!(err.to_string().contains("alpha -> beta -> alpha"));
}

#[test]
fn routine_errors_abort_the_compose() {
    let mut registry = DefinitionRegistry::new();
    let door = registry.declare("door").unwrap();
    let err = registry
        .compose(door, |c| {
            c.param("fold", ParamKind::Completion)?;
            c.param("fold", ParamKind::Completion)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, HoloformError::Composition(_)));
    assert!(registry.get(door).is_err());
}

use super::*;
use crate::holon::registry::PrimitiveSpec;
use crate::param::kind::{ParamKind, RangePolicy};

fn rig() -> (DefinitionRegistry, DefId) {
    let mut registry = DefinitionRegistry::new();
    let panel = registry
        .primitive(
            PrimitiveSpec::new("panel")
                .property("angle", ParamKind::Angle)
                .property_with_default("width", ParamKind::Length, Value::Scalar(40.0)),
        )
        .unwrap();
    let hinge = registry.declare("hinge").unwrap();
    registry
        .compose(hinge, |c| {
            c.part("plate", panel)?;
            Ok(())
        })
        .unwrap();
    let door = registry.declare("door").unwrap();
    registry
        .compose(door, |c| {
            c.param("fold", ParamKind::Completion)?;
            c.part("leaf", panel)?;
            c.part("joint", hinge)?;
            Ok(())
        })
        .unwrap();
    (registry, door)
}

#[test]
fn instantiation_is_depth_first_and_contiguous() {
    let (registry, door) = rig();
    let mut arena = InstanceArena::new();

    let root = arena.instantiate(&registry, door).unwrap();
    assert_eq!(root, InstanceId(0));
    assert_eq!(arena.len(), 4);

    // door(0) -> leaf panel(1), joint hinge(2) -> plate panel(3)
    let door_inst = arena.get(root).unwrap();
    assert_eq!(door_inst.children(), &[InstanceId(1), InstanceId(2)]);
    assert_eq!(door_inst.parent(), None);
    assert_eq!(door_inst.state(), None);

    let joint = arena.get(InstanceId(2)).unwrap();
    assert_eq!(joint.children(), &[InstanceId(3)]);
    assert_eq!(joint.parent(), Some(root));
    assert_eq!(arena.get(InstanceId(3)).unwrap().parent(), Some(InstanceId(2)));
}

#[test]
fn clones_start_at_defaults_and_stay_independent() {
    let (registry, door) = rig();
    let mut arena = InstanceArena::new();
    let first = arena.instantiate(&registry, door).unwrap();
    let second = arena.instantiate(&registry, door).unwrap();

    let fold = registry.get(door).unwrap().param_id("fold").unwrap();
    assert_eq!(arena.read(first, fold).unwrap(), Value::Scalar(0.0));
    assert_eq!(arena.read(second, fold).unwrap(), Value::Scalar(0.0));

    arena.write(&registry, first, fold, Value::Scalar(0.75)).unwrap();
    assert_eq!(arena.read(first, fold).unwrap(), Value::Scalar(0.75));
    assert_eq!(arena.read(second, fold).unwrap(), Value::Scalar(0.0));
}

#[test]
fn writes_are_admitted_under_the_registry_policy() {
    let (registry, door) = rig();
    let mut arena = InstanceArena::new();
    let root = arena.instantiate(&registry, door).unwrap();
    let fold = registry.get(door).unwrap().param_id("fold").unwrap();

    let err = arena
        .write(&registry, root, fold, Value::Scalar(1.5))
        .unwrap_err();
    assert!(matches!(err, HoloformError::Range(_)));
    assert_eq!(arena.read(root, fold).unwrap(), Value::Scalar(0.0));

    // a clamping registry coerces the same write
    let (registry, door) = {
        let mut r = DefinitionRegistry::with_policy(RangePolicy::Clamp);
        let panel = r
            .primitive(PrimitiveSpec::new("panel").property("angle", ParamKind::Angle))
            .unwrap();
        let door = r.declare("door").unwrap();
        r.compose(door, |c| {
            c.param("fold", ParamKind::Completion)?;
            c.part("leaf", panel)?;
            Ok(())
        })
        .unwrap();
        (r, door)
    };
    let mut arena = InstanceArena::new();
    let root = arena.instantiate(&registry, door).unwrap();
    let fold = registry.get(door).unwrap().param_id("fold").unwrap();
    arena.write(&registry, root, fold, Value::Scalar(1.5)).unwrap();
    assert_eq!(arena.read(root, fold).unwrap(), Value::Scalar(1.0));
}

#[test]
fn unknown_ids_and_slots_are_evaluation_errors() {
    let (registry, door) = rig();
    let mut arena = InstanceArena::new();
    let root = arena.instantiate(&registry, door).unwrap();

    let err = arena.read(InstanceId(99), ParamId(0)).unwrap_err();
    assert!(err.to_string().contains("unknown instance id"));

    let err = arena
        .write(&registry, root, ParamId(9), Value::Scalar(0.0))
        .unwrap_err();
    assert!(err.to_string().contains("has no parameter slot"));
}

#[test]
fn uncomposed_definitions_cannot_be_instantiated() {
    let mut registry = DefinitionRegistry::new();
    let ghost = registry.declare("ghost").unwrap();
    let mut arena = InstanceArena::new();
    assert!(arena.instantiate(&registry, ghost).is_err());
    assert!(arena.is_empty());
}

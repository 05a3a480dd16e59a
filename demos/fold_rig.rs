use std::f64::consts::PI;

use anyhow::Context as _;
use holoform::{
    DefinitionRegistry, EvalOpts, Evaluator, InstanceArena, ParamKind, PrimitiveSpec, Transform,
    Value,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut registry = DefinitionRegistry::new();
    let panel = registry.primitive(
        PrimitiveSpec::new("panel")
            .property("angle", ParamKind::Angle)
            .property("width", ParamKind::Length),
    )?;

    let door = registry.declare("door")?;
    registry.compose(door, |c| {
        c.param("fold", ParamKind::Completion)?;
        c.part("left", panel)?;
        c.part("right", panel)?;
        c.bind_with("fold", "left", "angle", Transform::Scale(PI))?;
        c.bind_with(
            "fold",
            "right",
            "angle",
            Transform::map(|v| match v {
                Value::Scalar(s) => Ok(Value::Scalar((1.0 - s) * PI)),
                other => Ok(other),
            }),
        )?;
        Ok(())
    })?;

    let fold = registry
        .get(door)?
        .param_id("fold")
        .context("door declares no fold")?;
    let angle = registry
        .get(panel)?
        .param_id("angle")
        .context("panel declares no angle")?;

    let mut arena = InstanceArena::new();
    let mut evaluator = Evaluator::new();
    for value in [0.0, 0.25, 0.5, 1.0] {
        let id = arena.instantiate(&registry, door)?;
        arena.write(&registry, id, fold, Value::Scalar(value))?;
        evaluator.evaluate(&registry, &mut arena, &[id], EvalOpts::default())?;

        let children = arena.get(id)?.children().to_vec();
        let left = arena.read(children[0], angle)?;
        let right = arena.read(children[1], angle)?;
        println!("fold {value}: left {left:?}, right {right:?}");
    }

    Ok(())
}

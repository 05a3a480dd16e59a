use std::f64::consts::PI;

use holoform::{
    Animate, DefinitionRegistry, Ease, Fps, InstanceArena, JsonLinesSink, ParamKind,
    PrimitiveSpec, Timeline, Transform, Value, transition_to,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut registry = DefinitionRegistry::new();
    let panel = registry.primitive(
        PrimitiveSpec::new("panel").property("angle", ParamKind::Angle),
    )?;

    let door = registry.declare("door")?;
    registry.compose(door, |c| {
        c.param("fold", ParamKind::Completion)?;
        c.param_in_group("spread", ParamKind::Angle, "pose")?;
        c.part("leaf", panel)?;
        c.bind_with("fold", "leaf", "angle", Transform::Scale(PI))?;
        c.state("open", &[("fold", Value::Scalar(1.0))])?;
        c.state(
            "closed",
            &[("fold", Value::Scalar(0.0)), ("spread", Value::Scalar(0.0))],
        )?;
        Ok(())
    })?;

    let mut arena = InstanceArena::new();
    let inst = arena.instantiate(&registry, door)?;

    let fps = Fps::new(30, 1)?;
    let mut timeline = Timeline::new(fps, JsonLinesSink::new(std::io::stdout()));

    // Snap into the open pose over a two-frame span.
    let opening = transition_to(&registry, &mut arena, inst, "open")?;
    timeline.set(&registry, &mut arena, vec![opening])?;

    // Sway the spread, each leg over half the window.
    let sway = Animate::new(&registry, &arena, inst)?
        .param("spread")?
        .sequence(&[Value::Scalar(0.8), Value::Scalar(0.2)])?
        .ease(Ease::OutCubic)
        .build()?;
    timeline.play(&registry, &mut arena, vec![sway], 2.0)?;

    timeline.wait(0.5)?;

    let closing = transition_to(&registry, &mut arena, inst, "closed")?.with_ease(Ease::InOutQuad);
    timeline.play(&registry, &mut arena, vec![closing], 1.0)?;

    eprintln!("cursor at {:.2}s", timeline.cursor_secs());
    Ok(())
}

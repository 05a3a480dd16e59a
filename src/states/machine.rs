use crate::animation::anim::{AnimTarget, Animation, Transition};
use crate::eval::arena::InstanceArena;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::InstanceId;
use crate::holon::registry::DefinitionRegistry;

/// Build the behavior moving `instance` into a declared state.
///
/// One raw full-window transition per state entry, each from the
/// parameter's current value to the state's target, grouped for the caller
/// to play or set. Transitions are unconditional: any state reaches any
/// other. The instance's state marker updates immediately — it tracks
/// intent, and the parameter values catch up when the returned behavior is
/// scheduled.
pub fn transition_to(
    registry: &DefinitionRegistry,
    arena: &mut InstanceArena,
    instance: InstanceId,
    state: &str,
) -> HoloformResult<Animation> {
    let def = arena.get(instance)?.def();
    let d = registry.get(def)?;
    let Some(state_id) = d.state_id(state) else {
        return Err(HoloformError::animation(format!(
            "definition `{}` declares no state named `{state}`",
            d.name()
        )));
    };
    let decl = d.state(state_id).ok_or_else(|| {
        HoloformError::animation(format!("state slot {state_id:?} out of range"))
    })?;

    let mut transitions = Vec::with_capacity(decl.values.len());
    for (param, value_final) in &decl.values {
        let spec = d.param_spec(*param).ok_or_else(|| {
            HoloformError::animation(format!(
                "state `{state}`: parameter slot {param:?} out of range"
            ))
        })?;
        let value_initial = arena.read(instance, *param)?;
        let target = AnimTarget {
            instance,
            param: *param,
            name: spec.name.clone(),
        };
        transitions.push(Animation::Transition(Transition::full(
            target,
            value_initial,
            *value_final,
        )));
    }

    arena.set_state(instance, state_id)?;
    Ok(Animation::Group(transitions))
}

/// Name of the state `instance` most recently entered, if any.
pub fn current_state<'r>(
    registry: &'r DefinitionRegistry,
    arena: &InstanceArena,
    instance: InstanceId,
) -> HoloformResult<Option<&'r str>> {
    let inst = arena.get(instance)?;
    let Some(state) = inst.state() else {
        return Ok(None);
    };
    let d = registry.get(inst.def())?;
    let decl = d.state(state).ok_or_else(|| {
        HoloformError::evaluation(format!(
            "state slot {state:?} not declared by definition `{}`",
            d.name()
        ))
    })?;
    Ok(Some(decl.name.as_str()))
}

#[cfg(test)]
#[path = "../../tests/unit/states/machine.rs"]
mod tests;

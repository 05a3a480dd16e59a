use std::collections::HashMap;

use crate::animation::anim::{AnimTarget, Animation, Transition};
use crate::animation::ease::Ease;
use crate::eval::arena::InstanceArena;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{InstanceId, ParamId};
use crate::holon::registry::DefinitionRegistry;
use crate::param::kind::Value;

/// Chainable behavior builder over one instance.
///
/// Reads go through a local shadow map so successive transitions on the
/// same parameter start where the previous one stopped; the arena itself
/// stays untouched until the built [`Animation`] is scheduled.
#[derive(Debug)]
pub struct Animate<'a> {
    registry: &'a DefinitionRegistry,
    arena: &'a InstanceArena,
    instance: InstanceId,
    transitions: Vec<Transition>,
    shadow: HashMap<ParamId, Value>,
}

impl<'a> Animate<'a> {
    /// Start building a behavior for `instance`.
    pub fn new(
        registry: &'a DefinitionRegistry,
        arena: &'a InstanceArena,
        instance: InstanceId,
    ) -> HoloformResult<Animate<'a>> {
        arena.get(instance)?;
        Ok(Animate {
            registry,
            arena,
            instance,
            transitions: Vec::new(),
            shadow: HashMap::new(),
        })
    }

    /// Select a parameter by name.
    pub fn param(self, name: &str) -> HoloformResult<ParamCursor<'a>> {
        let def = self.arena.get(self.instance)?.def();
        let d = self.registry.get(def)?;
        let Some(param) = d.param_id(name) else {
            return Err(HoloformError::animation(format!(
                "definition `{}` declares no parameter `{name}`",
                d.name()
            )));
        };
        Ok(ParamCursor {
            builder: self,
            param,
            name: name.to_string(),
        })
    }

    /// Claim `ease` for every transition queued so far.
    ///
    /// Claimed transitions keep their curve through any containing group
    /// or play call.
    pub fn ease(mut self, ease: Ease) -> Animate<'a> {
        for t in &mut self.transitions {
            if !t.eased {
                t.ease = ease;
                t.eased = true;
            }
        }
        self
    }

    /// Finish, yielding the built behavior value.
    pub fn build(self) -> HoloformResult<Animation> {
        if self.transitions.is_empty() {
            return Err(HoloformError::animation("behavior builds no transitions"));
        }
        Ok(Animation::Group(
            self.transitions
                .into_iter()
                .map(Animation::Transition)
                .collect(),
        ))
    }

    fn chained(&self, param: ParamId) -> HoloformResult<Value> {
        match self.shadow.get(&param) {
            Some(v) => Ok(*v),
            None => self.arena.read(self.instance, param),
        }
    }
}

/// One selected parameter on an [`Animate`] chain.
#[derive(Debug)]
pub struct ParamCursor<'a> {
    builder: Animate<'a>,
    param: ParamId,
    name: String,
}

impl<'a> ParamCursor<'a> {
    /// Queue a full-window transition from the chained value to `value`.
    pub fn to(self, value: Value) -> HoloformResult<Animate<'a>> {
        self.schedule(std::slice::from_ref(&value))
    }

    /// Queue one transition per value over equal shares of the window.
    ///
    /// The i-th of n transitions spans `[i/n, (i+1)/n]` and starts from the
    /// previous value in the chain.
    pub fn sequence(self, values: &[Value]) -> HoloformResult<Animate<'a>> {
        if values.is_empty() {
            return Err(HoloformError::animation(format!(
                "sequence on `{}` needs at least one value",
                self.name
            )));
        }
        self.schedule(values)
    }

    fn schedule(self, values: &[Value]) -> HoloformResult<Animate<'a>> {
        let ParamCursor {
            mut builder,
            param,
            name,
        } = self;
        let registry = builder.registry;
        let def = builder.arena.get(builder.instance)?.def();
        let spec = registry
            .get(def)?
            .param_spec(param)
            .ok_or_else(|| HoloformError::animation(format!("parameter slot {param:?} vanished")))?;
        let n = values.len();
        let mut from = builder.chained(param)?;
        for (i, raw) in values.iter().enumerate() {
            let to = spec
                .kind
                .admit(*raw, registry.policy())
                .map_err(|err| in_target_context(&name, err))?;
            let target = AnimTarget {
                instance: builder.instance,
                param,
                name: name.clone(),
            };
            builder.transitions.push(Transition::new(
                target,
                from,
                to,
                i as f64 / n as f64,
                (i + 1) as f64 / n as f64,
            )?);
            from = to;
        }
        builder.shadow.insert(param, from);
        Ok(builder)
    }
}

fn in_target_context(param: &str, err: HoloformError) -> HoloformError {
    match err {
        HoloformError::Range(msg) => {
            HoloformError::Range(format!("transition target for `{param}`: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fluent.rs"]
mod tests;

use crate::animation::ease::Ease;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{InstanceId, ParamId};
use crate::param::kind::Value;

/// Addressed parameter slot on one live instance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimTarget {
    /// Owning instance.
    pub instance: InstanceId,
    /// Parameter slot on the instance's definition.
    pub param: ParamId,
    /// Parameter name, carried for keyframe serialization.
    pub name: String,
}

/// One primitive parameter transition inside a behavior.
///
/// `rel_start` and `rel_stop` are fractions of the play window, not
/// absolute times; the scheduler maps them onto its cursor when the
/// behavior is played. `eased` records whether an easing layer has already
/// claimed this transition — containing layers leave claimed transitions
/// alone, so easing resolves exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Parameter being driven.
    pub target: AnimTarget,
    /// Value at the window start.
    pub value_initial: Value,
    /// Value at the window end.
    pub value_final: Value,
    /// Window start as a fraction of the play duration.
    pub rel_start: f64,
    /// Window end as a fraction of the play duration.
    pub rel_stop: f64,
    /// Easing curve between the two values.
    pub ease: Ease,
    /// Whether an easing layer has already claimed this transition.
    pub eased: bool,
}

impl Transition {
    /// Build a transition with a validated window.
    ///
    /// Starts raw with [`Ease::Linear`]; claim a curve via
    /// [`Animation::with_ease`] or the builder's `ease`.
    pub fn new(
        target: AnimTarget,
        value_initial: Value,
        value_final: Value,
        rel_start: f64,
        rel_stop: f64,
    ) -> HoloformResult<Transition> {
        check_window(rel_start, rel_stop)?;
        Ok(Transition {
            target,
            value_initial,
            value_final,
            rel_start,
            rel_stop,
            ease: Ease::Linear,
            eased: false,
        })
    }

    /// Raw full-window transition.
    pub(crate) fn full(target: AnimTarget, value_initial: Value, value_final: Value) -> Transition {
        Transition {
            target,
            value_initial,
            value_final,
            rel_start: 0.0,
            rel_stop: 1.0,
            ease: Ease::Linear,
            eased: false,
        }
    }

    pub(crate) fn check_window(&self) -> HoloformResult<()> {
        check_window(self.rel_start, self.rel_stop)
    }
}

fn check_window(rel_start: f64, rel_stop: f64) -> HoloformResult<()> {
    let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !in_unit(rel_start) || !in_unit(rel_stop) {
        return Err(HoloformError::animation(format!(
            "transition window [{rel_start}, {rel_stop}] must lie in [0, 1]"
        )));
    }
    if rel_start >= rel_stop {
        return Err(HoloformError::animation(format!(
            "transition window [{rel_start}, {rel_stop}] must have rel_start < rel_stop"
        )));
    }
    Ok(())
}

/// A behavior's value: one transition, or a group sharing a play window.
///
/// Groups aggregate without re-scaling: flattening yields each transition
/// with its own declared window, all relative to the same play window.
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// A single parameter transition.
    Transition(Transition),
    /// Animations scheduled together over one play window.
    Group(Vec<Animation>),
}

impl Animation {
    /// Group `items` under one play window.
    pub fn group(items: Vec<Animation>) -> Animation {
        Animation::Group(items)
    }

    /// Apply `ease` to every transition no easing layer has claimed yet.
    ///
    /// Claimed transitions pass through untouched, whatever the nesting
    /// depth, so wrapping an already-eased behavior never re-distorts it.
    pub fn with_ease(self, ease: Ease) -> Animation {
        match self {
            Animation::Transition(mut t) => {
                if !t.eased {
                    t.ease = ease;
                    t.eased = true;
                }
                Animation::Transition(t)
            }
            Animation::Group(items) => {
                Animation::Group(items.into_iter().map(|a| a.with_ease(ease)).collect())
            }
        }
    }

    /// Flatten into primitive transitions, in declaration order.
    pub fn into_transitions(self) -> Vec<Transition> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    /// Number of primitive transitions in this behavior.
    pub fn transition_count(&self) -> usize {
        match self {
            Animation::Transition(_) => 1,
            Animation::Group(items) => items.iter().map(Animation::transition_count).sum(),
        }
    }

    fn collect_into(self, out: &mut Vec<Transition>) {
        match self {
            Animation::Transition(t) => out.push(t),
            Animation::Group(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;

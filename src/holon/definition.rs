use std::fmt;
use std::sync::Arc;

use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{DefId, ParamId, PartIdx, StateId};
use crate::param::kind::Value;
use crate::param::store::ParamSpec;

/// Whether a definition is a renderer-supplied leaf or a composed holon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    /// Terminal object declared by the renderer; properties only, no parts.
    Primitive,
    /// Holon assembled from parts, bindings and states via a [`Composer`].
    ///
    /// [`Composer`]: crate::Composer
    Composed,
}

/// A named child slot on a composed definition.
///
/// Every instance of the whole gets its own instance of `def` for each part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDecl {
    /// Slot name, unique among the definition's parts.
    pub name: String,
    /// Definition instantiated into this slot.
    pub def: DefId,
}

/// A `part.property` address, by name.
///
/// Names are kept as declared and resolved against the part's definition at
/// compile time, so a composition routine may reference parts it declares
/// later in the same routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRef {
    /// Part slot name on the whole.
    pub part: String,
    /// Property (parameter) name on the part's definition.
    pub property: String,
}

impl PropertyRef {
    /// Address `part.property`.
    pub fn new(part: impl Into<String>, property: impl Into<String>) -> PropertyRef {
        PropertyRef {
            part: part.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.part, self.property)
    }
}

/// Where a binding draws its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingSource {
    /// A parameter of the composed whole (one-way bindings).
    Param(String),
    /// A property of a sibling part (bidirectional bindings).
    Property(PropertyRef),
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSource::Param(name) => write!(f, "{name}"),
            BindingSource::Property(prop) => write!(f, "{prop}"),
        }
    }
}

/// Data-flow direction of a binding edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Source drives target; target never writes back.
    OneWay,
    /// Both endpoints are to stay equal, with no privileged direction.
    Bidirectional,
}

/// Pure value transform applied along a one-way binding edge.
#[derive(Clone)]
pub enum Transform {
    /// Pass the value through unchanged.
    Identity,
    /// Multiply a scalar by a constant.
    Scale(f64),
    /// Add a constant to a scalar.
    Offset(f64),
    /// Flip a scalar's sign.
    Negate,
    /// Arbitrary author-supplied mapping.
    ///
    /// The function must be pure: same input, same output, no side effects.
    /// Compiled programs assume it and the fingerprint treats it as opaque.
    Map(Arc<dyn Fn(Value) -> HoloformResult<Value> + Send + Sync>),
}

impl Transform {
    /// Wrap a pure mapping function.
    pub fn map<F>(f: F) -> Transform
    where
        F: Fn(Value) -> HoloformResult<Value> + Send + Sync + 'static,
    {
        Transform::Map(Arc::new(f))
    }

    pub(crate) fn apply(&self, value: Value) -> HoloformResult<Value> {
        match self {
            Transform::Identity => Ok(value),
            Transform::Scale(k) => scalar_arg(value, "scale").map(|v| Value::Scalar(v * k)),
            Transform::Offset(k) => scalar_arg(value, "offset").map(|v| Value::Scalar(v + k)),
            Transform::Negate => scalar_arg(value, "negate").map(|v| Value::Scalar(-v)),
            Transform::Map(f) => f(value),
        }
    }

    pub(crate) fn tag(&self) -> u8 {
        match self {
            Transform::Identity => 0,
            Transform::Scale(_) => 1,
            Transform::Offset(_) => 2,
            Transform::Negate => 3,
            Transform::Map(_) => 4,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => write!(f, "Identity"),
            Transform::Scale(k) => f.debug_tuple("Scale").field(k).finish(),
            Transform::Offset(k) => f.debug_tuple("Offset").field(k).finish(),
            Transform::Negate => write!(f, "Negate"),
            Transform::Map(_) => write!(f, "Map(..)"),
        }
    }
}

fn scalar_arg(value: Value, op: &str) -> HoloformResult<f64> {
    value.as_scalar().ok_or_else(|| {
        HoloformError::evaluation(format!(
            "{op} transform expects a scalar, got {}",
            value.variant_name()
        ))
    })
}

/// One declared binding edge, names unresolved.
#[derive(Debug, Clone)]
pub struct BindingDecl {
    /// Value source (a whole parameter, or a sibling property).
    pub source: BindingSource,
    /// Target part property.
    pub target: PropertyRef,
    /// Direction of data flow.
    pub mode: BindingMode,
    /// Transform applied between source and target.
    pub transform: Transform,
}

/// Named parameter preset, resolved against the owning definition.
#[derive(Debug, Clone)]
pub struct StateDecl {
    /// State name, unique within the definition.
    pub name: String,
    /// Resolved `(parameter, target value)` pairs, in declaration order.
    pub values: Vec<(ParamId, Value)>,
}

/// Immutable description of one kind of entity.
///
/// Built once through [`DefinitionRegistry`] and shared by every instance;
/// all per-instance mutable state lives in the [`InstanceArena`].
///
/// [`DefinitionRegistry`]: crate::DefinitionRegistry
/// [`InstanceArena`]: crate::InstanceArena
#[derive(Debug, Clone)]
pub struct HolonDef {
    pub(crate) name: String,
    pub(crate) kind: DefKind,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) parts: Vec<PartDecl>,
    pub(crate) bindings: Vec<BindingDecl>,
    pub(crate) states: Vec<StateDecl>,
}

impl HolonDef {
    /// Definition name, unique within its registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leaf or composed.
    pub fn kind(&self) -> DefKind {
        self.kind
    }

    /// Declared parameters, in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Declared part slots, in declaration order.
    pub fn parts(&self) -> &[PartDecl] {
        &self.parts
    }

    /// Declared bindings, in declaration order.
    pub fn bindings(&self) -> &[BindingDecl] {
        &self.bindings
    }

    /// Declared states, in declaration order.
    pub fn states(&self) -> &[StateDecl] {
        &self.states
    }

    /// Resolve a parameter name to its slot id.
    pub fn param_id(&self, name: &str) -> Option<ParamId> {
        self.params
            .iter()
            .position(|p| p.name == name)
            .map(|i| ParamId(i as u16))
    }

    /// Spec of one parameter slot.
    pub fn param_spec(&self, param: ParamId) -> Option<&ParamSpec> {
        self.params.get(param.index())
    }

    /// Resolve a part name to its slot index.
    pub fn part_idx(&self, name: &str) -> Option<PartIdx> {
        self.parts
            .iter()
            .position(|p| p.name == name)
            .map(|i| PartIdx(i as u32))
    }

    /// Resolve a state name to its id.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(|i| StateId(i as u16))
    }

    pub(crate) fn state(&self, state: StateId) -> Option<&StateDecl> {
        self.states.get(state.index())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/holon/definition.rs"]
mod tests;

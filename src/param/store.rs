use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::ParamId;
use crate::param::kind::{ParamKind, RangePolicy, Value};

/// Declared parameter: immutable identity on a definition.
///
/// A part's "property" is nothing more than a parameter declared by the
/// part's own definition; bindings address them through the same specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Unique name within the owning definition.
    pub name: String,
    /// Semantic kind defining the admissible domain.
    pub kind: ParamKind,
    /// Value instances start from.
    pub default: Value,
    /// Optional ability group (a parameter set that may or may not be bound).
    pub group: Option<String>,
}

impl ParamSpec {
    /// Declare a parameter, validating the default against the kind's domain.
    ///
    /// With no explicit default the kind-level default applies (length 100,
    /// angle 0, bipolar 0, completion 0, color white, integer 0, bool false).
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        default: Option<Value>,
        policy: RangePolicy,
    ) -> HoloformResult<ParamSpec> {
        let name = name.into();
        let default = match default {
            Some(v) => kind
                .admit(v, policy)
                .map_err(|err| in_param_context(&format!("default for `{name}`"), err))?,
            None => kind.default_value(),
        };
        Ok(ParamSpec {
            name,
            kind,
            default,
            group: None,
        })
    }

    pub(crate) fn in_group(mut self, group: impl Into<String>) -> ParamSpec {
        self.group = Some(group.into());
        self
    }
}

/// One instance's parameter value slots.
///
/// A slot always holds a value satisfying its spec's domain; the write path
/// is the only mutation and goes through [`ParamKind::admit`].
#[derive(Debug, Clone)]
pub struct ParamStore {
    values: Vec<Value>,
}

impl ParamStore {
    /// Initialize every slot to its declared default.
    pub fn from_defaults(specs: &[ParamSpec]) -> ParamStore {
        ParamStore {
            values: specs.iter().map(|s| s.default).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store has no slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read one slot.
    pub fn read(&self, param: ParamId) -> HoloformResult<Value> {
        self.values.get(param.index()).copied().ok_or_else(|| {
            HoloformError::evaluation(format!("parameter slot {param:?} out of bounds"))
        })
    }

    /// Write one slot, admitting the value under `policy`.
    ///
    /// On rejection the slot keeps its previous value.
    pub fn write(
        &mut self,
        spec: &ParamSpec,
        param: ParamId,
        value: Value,
        policy: RangePolicy,
    ) -> HoloformResult<()> {
        let admitted = spec
            .kind
            .admit(value, policy)
            .map_err(|err| in_param_context(&format!("parameter `{}`", spec.name), err))?;
        let slot = self.values.get_mut(param.index()).ok_or_else(|| {
            HoloformError::evaluation(format!("parameter slot {param:?} out of bounds"))
        })?;
        *slot = admitted;
        Ok(())
    }
}

/// Prefix range messages with the parameter they concern; other kinds pass
/// through untouched.
fn in_param_context(context: &str, err: HoloformError) -> HoloformError {
    match err {
        HoloformError::Range(msg) => HoloformError::Range(format!("{context}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/param/store.rs"]
mod tests;

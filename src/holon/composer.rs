use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{DefId, ParamId};
use crate::holon::definition::{
    BindingDecl, BindingMode, BindingSource, DefKind, HolonDef, PartDecl, PropertyRef, StateDecl,
    Transform,
};
use crate::param::kind::{ParamKind, RangePolicy, Value};
use crate::param::store::ParamSpec;

/// Declaration context handed to a composition routine.
///
/// A routine runs exactly once per definition and sees only declared names,
/// never instance values: the same declarations compile once and evaluate
/// for any number of instances. Binding endpoints are recorded as names and
/// resolved at compile time, so a routine may bind to a part it declares
/// later in the same routine.
#[derive(Debug)]
pub struct Composer {
    name: String,
    policy: RangePolicy,
    params: Vec<ParamSpec>,
    parts: Vec<PartDecl>,
    bindings: Vec<BindingDecl>,
    states: Vec<StateDecl>,
}

impl Composer {
    pub(crate) fn new(name: &str, policy: RangePolicy) -> Composer {
        Composer {
            name: name.to_string(),
            policy,
            params: Vec::new(),
            parts: Vec::new(),
            bindings: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Declare a parameter with the kind-level default.
    pub fn param(&mut self, name: &str, kind: ParamKind) -> HoloformResult<&mut Self> {
        self.push_param(ParamSpec::new(name, kind, None, self.policy)?)
    }

    /// Declare a parameter with an explicit default.
    ///
    /// The default is admitted under the registry's range policy; an
    /// out-of-domain default is a range error here, not at first write.
    pub fn param_with_default(
        &mut self,
        name: &str,
        kind: ParamKind,
        default: Value,
    ) -> HoloformResult<&mut Self> {
        self.push_param(ParamSpec::new(name, kind, Some(default), self.policy)?)
    }

    /// Declare a parameter inside an ability group.
    ///
    /// Groups carry no semantics of their own; they let authors declare a
    /// set of related parameters that bindings may or may not drive.
    pub fn param_in_group(
        &mut self,
        name: &str,
        kind: ParamKind,
        group: &str,
    ) -> HoloformResult<&mut Self> {
        self.push_param(ParamSpec::new(name, kind, None, self.policy)?.in_group(group))
    }

    /// Declare a named part slot instantiating `def`.
    pub fn part(&mut self, name: &str, def: DefId) -> HoloformResult<&mut Self> {
        if self.parts.iter().any(|p| p.name == name) {
            return Err(HoloformError::composition(format!(
                "definition `{}`: duplicate part `{name}`",
                self.name
            )));
        }
        self.parts.push(PartDecl {
            name: name.to_string(),
            def,
        });
        Ok(self)
    }

    /// Bind a whole parameter to a part property, one-way, unchanged.
    pub fn bind(&mut self, param: &str, part: &str, property: &str) -> HoloformResult<&mut Self> {
        self.bind_with(param, part, property, Transform::Identity)
    }

    /// Bind a whole parameter to a part property through a transform.
    pub fn bind_with(
        &mut self,
        param: &str,
        part: &str,
        property: &str,
        transform: Transform,
    ) -> HoloformResult<&mut Self> {
        let target = PropertyRef::new(part, property);
        self.check_unclaimed(&target, param)?;
        self.bindings.push(BindingDecl {
            source: BindingSource::Param(param.to_string()),
            target,
            mode: BindingMode::OneWay,
            transform,
        });
        Ok(self)
    }

    /// Declare that two part properties are to stay equal.
    ///
    /// No privileged direction; the compiler records the pair without
    /// solving it and evaluation leaves both properties untouched.
    pub fn bind_bidirectional(
        &mut self,
        left_part: &str,
        left_property: &str,
        right_part: &str,
        right_property: &str,
    ) -> HoloformResult<&mut Self> {
        self.bindings.push(BindingDecl {
            source: BindingSource::Property(PropertyRef::new(left_part, left_property)),
            target: PropertyRef::new(right_part, right_property),
            mode: BindingMode::Bidirectional,
            transform: Transform::Identity,
        });
        Ok(self)
    }

    /// Declare a named state: a preset of parameter target values.
    ///
    /// Entries resolve against parameters already declared by this routine
    /// and their values are admitted under the registry's range policy.
    pub fn state(&mut self, name: &str, entries: &[(&str, Value)]) -> HoloformResult<&mut Self> {
        if self.states.iter().any(|s| s.name == name) {
            return Err(HoloformError::composition(format!(
                "definition `{}`: duplicate state `{name}`",
                self.name
            )));
        }
        if entries.is_empty() {
            return Err(HoloformError::composition(format!(
                "definition `{}`: state `{name}` sets no parameters",
                self.name
            )));
        }
        let mut values = Vec::with_capacity(entries.len());
        for (param, value) in entries {
            let Some(id) = self
                .params
                .iter()
                .position(|p| p.name == *param)
                .map(|i| ParamId(i as u16))
            else {
                return Err(HoloformError::composition(format!(
                    "definition `{}`: state `{name}` references unknown parameter `{param}`",
                    self.name
                )));
            };
            let spec = &self.params[id.index()];
            let admitted = spec.kind.admit(*value, self.policy).map_err(|err| {
                in_state_context(&self.name, name, param, err)
            })?;
            values.push((id, admitted));
        }
        self.states.push(StateDecl {
            name: name.to_string(),
            values,
        });
        Ok(self)
    }

    fn push_param(&mut self, spec: ParamSpec) -> HoloformResult<&mut Self> {
        if self.params.iter().any(|p| p.name == spec.name) {
            return Err(HoloformError::composition(format!(
                "definition `{}`: duplicate parameter `{}`",
                self.name, spec.name
            )));
        }
        if self.params.len() >= usize::from(u16::MAX) {
            return Err(HoloformError::composition(format!(
                "definition `{}`: too many parameters",
                self.name
            )));
        }
        self.params.push(spec);
        Ok(self)
    }

    /// A property may be the destination of at most one OneWay binding.
    fn check_unclaimed(&self, target: &PropertyRef, source: &str) -> HoloformResult<()> {
        for b in &self.bindings {
            if b.mode == BindingMode::OneWay && b.target == *target {
                return Err(HoloformError::ambiguous_binding(format!(
                    "definition `{}`: bindings from `{}` and `{source}` both target `{target}`",
                    self.name, b.source
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn into_def(self) -> HolonDef {
        HolonDef {
            name: self.name,
            kind: DefKind::Composed,
            params: self.params,
            parts: self.parts,
            bindings: self.bindings,
            states: self.states,
        }
    }
}

fn in_state_context(def: &str, state: &str, param: &str, err: HoloformError) -> HoloformError {
    match err {
        HoloformError::Range(msg) => HoloformError::Range(format!(
            "definition `{def}`: state `{state}`, parameter `{param}`: {msg}"
        )),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/holon/composer.rs"]
mod tests;

use std::collections::{BTreeSet, HashMap};

use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::DefId;
use crate::holon::composer::Composer;
use crate::holon::definition::{DefKind, HolonDef};
use crate::param::kind::{ParamKind, RangePolicy, Value};
use crate::param::store::ParamSpec;

/// Builder for a renderer-declared terminal primitive.
///
/// Property validation happens at registration, under the registry's range
/// policy; the builder itself never fails.
#[derive(Debug, Clone)]
pub struct PrimitiveSpec {
    name: String,
    props: Vec<RawProp>,
}

#[derive(Debug, Clone)]
struct RawProp {
    name: String,
    kind: ParamKind,
    default: Option<Value>,
    group: Option<String>,
}

impl PrimitiveSpec {
    /// Start a primitive named `name`.
    pub fn new(name: impl Into<String>) -> PrimitiveSpec {
        PrimitiveSpec {
            name: name.into(),
            props: Vec::new(),
        }
    }

    /// Add a property with the kind-level default.
    pub fn property(mut self, name: impl Into<String>, kind: ParamKind) -> PrimitiveSpec {
        self.props.push(RawProp {
            name: name.into(),
            kind,
            default: None,
            group: None,
        });
        self
    }

    /// Add a property with an explicit default.
    pub fn property_with_default(
        mut self,
        name: impl Into<String>,
        kind: ParamKind,
        default: Value,
    ) -> PrimitiveSpec {
        self.props.push(RawProp {
            name: name.into(),
            kind,
            default: Some(default),
            group: None,
        });
        self
    }

    /// Add a property inside an ability group.
    pub fn ability(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        kind: ParamKind,
    ) -> PrimitiveSpec {
        self.props.push(RawProp {
            name: name.into(),
            kind,
            default: None,
            group: Some(group.into()),
        });
        self
    }
}

/// Owner of every definition in play.
///
/// Definitions are immutable once composed; the only mutations are
/// `declare`, `primitive` and the one-shot `compose` per reserved id.
/// The registry also fixes the range policy every parameter write in this
/// world is admitted under.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    policy: RangePolicy,
    slots: Vec<DefSlot>,
    by_name: HashMap<String, DefId>,
}

#[derive(Debug)]
struct DefSlot {
    name: String,
    def: Option<HolonDef>,
}

impl DefinitionRegistry {
    /// Registry rejecting out-of-range writes.
    pub fn new() -> DefinitionRegistry {
        DefinitionRegistry::with_policy(RangePolicy::Reject)
    }

    /// Registry with an explicit range policy.
    pub fn with_policy(policy: RangePolicy) -> DefinitionRegistry {
        DefinitionRegistry {
            policy,
            slots: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Range policy fixed for this registry.
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Number of declared definitions (composed or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been declared yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reserve a definition id under a unique name.
    ///
    /// A reserved id may be used as a part before it is composed, which is
    /// how forward references between definitions are written.
    pub fn declare(&mut self, name: &str) -> HoloformResult<DefId> {
        self.reserve(name)
    }

    /// Register a terminal primitive: leaf properties, no parts.
    pub fn primitive(&mut self, spec: PrimitiveSpec) -> HoloformResult<DefId> {
        let mut params: Vec<ParamSpec> = Vec::with_capacity(spec.props.len());
        for prop in &spec.props {
            if params.iter().any(|p| p.name == prop.name) {
                return Err(HoloformError::composition(format!(
                    "primitive `{}`: duplicate property `{}`",
                    spec.name, prop.name
                )));
            }
            let mut built = ParamSpec::new(&prop.name, prop.kind, prop.default, self.policy)
                .map_err(|err| in_def_context(&spec.name, err))?;
            if let Some(group) = &prop.group {
                built = built.in_group(group);
            }
            params.push(built);
        }
        let id = self.reserve(&spec.name)?;
        self.slots[id.index()].def = Some(HolonDef {
            name: spec.name,
            kind: DefKind::Primitive,
            params,
            parts: Vec::new(),
            bindings: Vec::new(),
            states: Vec::new(),
        });
        Ok(id)
    }

    /// Run a composition routine against a reserved definition.
    ///
    /// The routine executes exactly once. Afterwards the part graph is
    /// checked for cycles; the compose call that closes a cycle is the one
    /// that fails, and the definition stays uncomposed.
    #[tracing::instrument(skip(self, routine))]
    pub fn compose<F>(&mut self, def: DefId, routine: F) -> HoloformResult<()>
    where
        F: FnOnce(&mut Composer) -> HoloformResult<()>,
    {
        let slot = self.slots.get(def.index()).ok_or_else(|| {
            HoloformError::composition(format!("unknown definition id {def:?}"))
        })?;
        if let Some(existing) = &slot.def {
            let what = match existing.kind {
                DefKind::Primitive => "is a primitive and cannot be composed",
                DefKind::Composed => "is already composed",
            };
            return Err(HoloformError::composition(format!(
                "definition `{}` {what}",
                slot.name
            )));
        }

        let mut composer = Composer::new(&slot.name, self.policy);
        routine(&mut composer)?;
        let built = composer.into_def();

        for part in &built.parts {
            if part.def.index() >= self.slots.len() {
                return Err(HoloformError::composition(format!(
                    "definition `{}`: part `{}` references an unknown definition",
                    built.name, part.name
                )));
            }
            if let Some(path) = self.find_cycle(def, part.def) {
                return Err(HoloformError::composition_cycle(self.path_names(&path)));
            }
        }

        self.slots[def.index()].def = Some(built);
        Ok(())
    }

    /// Look up a composed (or primitive) definition.
    pub fn get(&self, def: DefId) -> HoloformResult<&HolonDef> {
        let slot = self.slots.get(def.index()).ok_or_else(|| {
            HoloformError::composition(format!("unknown definition id {def:?}"))
        })?;
        slot.def.as_ref().ok_or_else(|| {
            HoloformError::composition(format!(
                "definition `{}` is declared but never composed",
                slot.name
            ))
        })
    }

    /// Name under which `def` was declared.
    pub fn name_of(&self, def: DefId) -> HoloformResult<&str> {
        self.slots
            .get(def.index())
            .map(|s| s.name.as_str())
            .ok_or_else(|| HoloformError::composition(format!("unknown definition id {def:?}")))
    }

    /// Resolve a definition name to its id.
    pub fn find(&self, name: &str) -> Option<DefId> {
        self.by_name.get(name).copied()
    }

    fn reserve(&mut self, name: &str) -> HoloformResult<DefId> {
        if self.by_name.contains_key(name) {
            return Err(HoloformError::composition(format!(
                "a definition named `{name}` already exists"
            )));
        }
        let raw = u32::try_from(self.slots.len())
            .map_err(|_| HoloformError::composition("definition capacity exceeded"))?;
        let id = DefId(raw);
        self.slots.push(DefSlot {
            name: name.to_string(),
            def: None,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Depth-first search for a path from `from` back to `needle`.
    ///
    /// Uncomposed definitions count as leaves: they have no parts yet, and
    /// the compose call that later gives them parts re-runs this check.
    fn find_cycle(&self, needle: DefId, from: DefId) -> Option<Vec<DefId>> {
        let mut path = vec![needle, from];
        let mut seen = BTreeSet::new();
        if self.reaches(from, needle, &mut path, &mut seen) {
            Some(path)
        } else {
            None
        }
    }

    fn reaches(
        &self,
        from: DefId,
        needle: DefId,
        path: &mut Vec<DefId>,
        seen: &mut BTreeSet<DefId>,
    ) -> bool {
        if from == needle {
            return true;
        }
        if !seen.insert(from) {
            return false;
        }
        let parts = match self.slots.get(from.index()).and_then(|s| s.def.as_ref()) {
            Some(def) => &def.parts,
            None => return false,
        };
        for part in parts {
            path.push(part.def);
            if self.reaches(part.def, needle, path, seen) {
                return true;
            }
            path.pop();
        }
        false
    }

    fn path_names(&self, path: &[DefId]) -> String {
        path.iter()
            .map(|id| {
                self.slots
                    .get(id.index())
                    .map(|s| s.name.as_str())
                    .unwrap_or("?")
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

fn in_def_context(def: &str, err: HoloformError) -> HoloformError {
    match err {
        HoloformError::Range(msg) => {
            HoloformError::Range(format!("primitive `{def}`: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/holon/registry.rs"]
mod tests;

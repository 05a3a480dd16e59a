use smallvec::SmallVec;

use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{DefId, InstanceId, ParamId, StateId};
use crate::holon::registry::DefinitionRegistry;
use crate::param::kind::Value;
use crate::param::store::ParamStore;

/// One live entity: a definition reference plus its own mutable state.
///
/// Instances hold values, never structure; everything structural lives on
/// the shared definition.
#[derive(Debug, Clone)]
pub struct HolonInstance {
    pub(crate) def: DefId,
    pub(crate) values: ParamStore,
    pub(crate) children: SmallVec<[InstanceId; 4]>,
    pub(crate) parent: Option<InstanceId>,
    pub(crate) state: Option<StateId>,
}

impl HolonInstance {
    /// Definition this instance was built from.
    pub fn def(&self) -> DefId {
        self.def
    }

    /// Current parameter values.
    pub fn values(&self) -> &ParamStore {
        &self.values
    }

    /// Child instances, index-aligned with the definition's part slots.
    pub fn children(&self) -> &[InstanceId] {
        &self.children
    }

    /// Owning instance, `None` for a subtree root.
    pub fn parent(&self) -> Option<InstanceId> {
        self.parent
    }

    /// Most recently entered state, `None` before any transition.
    pub fn state(&self) -> Option<StateId> {
        self.state
    }
}

/// Arena of live instances.
///
/// Allocation is depth-first, so a subtree always occupies a contiguous id
/// range with its root first; ids are never reused or invalidated.
#[derive(Debug, Default)]
pub struct InstanceArena {
    instances: Vec<HolonInstance>,
}

impl InstanceArena {
    /// Empty arena.
    pub fn new() -> InstanceArena {
        InstanceArena::default()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the arena holds no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Build one instance of `def`, including the full part subtree.
    ///
    /// Every parameter starts at its declared default. Instantiating the
    /// same definition again yields a fully independent clone.
    #[tracing::instrument(skip(self, registry))]
    pub fn instantiate(
        &mut self,
        registry: &DefinitionRegistry,
        def: DefId,
    ) -> HoloformResult<InstanceId> {
        self.instantiate_part(registry, def, None)
    }

    fn instantiate_part(
        &mut self,
        registry: &DefinitionRegistry,
        def: DefId,
        parent: Option<InstanceId>,
    ) -> HoloformResult<InstanceId> {
        let d = registry.get(def)?;
        let raw = u32::try_from(self.instances.len())
            .map_err(|_| HoloformError::evaluation("instance capacity exceeded"))?;
        let id = InstanceId(raw);
        self.instances.push(HolonInstance {
            def,
            values: ParamStore::from_defaults(d.params()),
            children: SmallVec::new(),
            parent,
            state: None,
        });
        let mut children = SmallVec::with_capacity(d.parts().len());
        for part in d.parts() {
            children.push(self.instantiate_part(registry, part.def, Some(id))?);
        }
        self.instances[id.index()].children = children;
        Ok(id)
    }

    /// Look up one instance.
    pub fn get(&self, instance: InstanceId) -> HoloformResult<&HolonInstance> {
        self.instances
            .get(instance.index())
            .ok_or_else(|| unknown_instance(instance))
    }

    pub(crate) fn get_mut(&mut self, instance: InstanceId) -> HoloformResult<&mut HolonInstance> {
        self.instances
            .get_mut(instance.index())
            .ok_or_else(|| unknown_instance(instance))
    }

    /// Read one parameter value.
    pub fn read(&self, instance: InstanceId, param: ParamId) -> HoloformResult<Value> {
        self.get(instance)?.values.read(param)
    }

    /// Write one parameter, admitted under the registry's range policy.
    pub fn write(
        &mut self,
        registry: &DefinitionRegistry,
        instance: InstanceId,
        param: ParamId,
        value: Value,
    ) -> HoloformResult<()> {
        let def = self.get(instance)?.def;
        let d = registry.get(def)?;
        let spec = d.param_spec(param).ok_or_else(|| {
            HoloformError::evaluation(format!(
                "definition `{}` has no parameter slot {param:?}",
                d.name()
            ))
        })?;
        let policy = registry.policy();
        self.get_mut(instance)?.values.write(spec, param, value, policy)
    }

    pub(crate) fn set_state(&mut self, instance: InstanceId, state: StateId) -> HoloformResult<()> {
        self.get_mut(instance)?.state = Some(state);
        Ok(())
    }
}

fn unknown_instance(instance: InstanceId) -> HoloformError {
    HoloformError::evaluation(format!("unknown instance id {instance:?}"))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/arena.rs"]
mod tests;

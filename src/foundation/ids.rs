//! Index newtypes tying definitions, parameters, parts and instances together
//! without direct object embedding.

/// Identifier of a definition inside a [`DefinitionRegistry`].
///
/// [`DefinitionRegistry`]: crate::DefinitionRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct DefId(pub(crate) u32);

/// Index of a parameter within its owning definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ParamId(pub(crate) u16);

/// Index of a part slot within its owning definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct PartIdx(pub(crate) u32);

/// Identifier of an instance inside an [`InstanceArena`].
///
/// [`InstanceArena`]: crate::InstanceArena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct InstanceId(pub(crate) u32);

/// Index of a declared state within its owning definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct StateId(pub(crate) u16);

impl DefId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl ParamId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl PartIdx {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl InstanceId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl StateId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

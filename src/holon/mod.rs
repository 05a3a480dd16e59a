//! Holon declarations: definitions, the one-shot composition routine context,
//! and the registry that owns the immutable definition set.

pub(crate) mod composer;
pub(crate) mod definition;
pub(crate) mod registry;

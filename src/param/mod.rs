//! Typed, ranged parameters: the degrees of freedom a holon exposes.

pub(crate) mod kind;
pub(crate) mod store;

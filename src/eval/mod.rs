//! Live instances and the evaluation pass that runs compiled programs over
//! them, parents before children.

pub(crate) mod arena;
pub(crate) mod evaluator;

//! Shared primitives: error taxonomy, ids, frame-rate arithmetic.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod ids;

//! Binding-graph compilation: per-definition update programs, the content
//! fingerprint, and the cache that memoizes compiled programs.

pub(crate) mod compiler;
pub(crate) mod fingerprint;
pub(crate) mod program;

//! Behavior values: parameter transitions, grouping, easing, and the
//! fluent builder that produces them.

pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod fluent;

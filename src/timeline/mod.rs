//! Absolute-time scheduling: the timeline cursor and the keyframe sinks
//! behind which a real-time renderer sits.

pub(crate) mod scheduler;
pub(crate) mod sink;

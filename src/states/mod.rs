//! Named parameter presets and the behavior-producing transitions between
//! them.

pub(crate) mod machine;

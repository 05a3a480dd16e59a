/// Convenience result type used across Holoform.
pub type HoloformResult<T> = Result<T, HoloformError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The first four variants are the composition/compile-time failures that are
/// fatal to a definition; evaluation never starts against a definition that
/// produced one of them.
#[derive(thiserror::Error, Debug)]
pub enum HoloformError {
    /// A parameter write (or declared default) outside its kind's domain.
    #[error("range error: {0}")]
    Range(String),

    /// A part graph that directly or transitively contains its own definition.
    #[error("composition cycle: {0}")]
    CompositionCycle(String),

    /// Two one-way bindings claiming the same target property.
    #[error("ambiguous binding: {0}")]
    AmbiguousBinding(String),

    /// A binding naming a part, property or parameter that does not exist.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Invalid declaration data (duplicate names, misused definitions).
    #[error("composition error: {0}")]
    Composition(String),

    /// Errors while building or scheduling animation values.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating compiled programs against instances.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing data for a renderer boundary.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoloformError {
    /// Build a [`HoloformError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`HoloformError::CompositionCycle`] value.
    pub fn composition_cycle(msg: impl Into<String>) -> Self {
        Self::CompositionCycle(msg.into())
    }

    /// Build a [`HoloformError::AmbiguousBinding`] value.
    pub fn ambiguous_binding(msg: impl Into<String>) -> Self {
        Self::AmbiguousBinding(msg.into())
    }

    /// Build a [`HoloformError::UnresolvedReference`] value.
    pub fn unresolved_reference(msg: impl Into<String>) -> Self {
        Self::UnresolvedReference(msg.into())
    }

    /// Build a [`HoloformError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`HoloformError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`HoloformError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`HoloformError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

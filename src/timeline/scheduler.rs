use crate::animation::anim::{Animation, Transition};
use crate::eval::arena::InstanceArena;
use crate::foundation::core::Fps;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::holon::registry::DefinitionRegistry;
use crate::timeline::sink::{KeyTarget, KeyframePair, KeyframeSink};

/// Monotonic scheduler mapping behaviors onto absolute-time keyframes.
///
/// The cursor, in seconds, only moves forward. `play` stretches each
/// transition's relative window onto `[cursor, cursor + duration]`, submits
/// the resulting pairs to the sink, writes every final value into the
/// arena, then advances the cursor by the full duration — so later
/// behaviors read the post-play world and later plays land strictly after
/// this one.
#[derive(Debug)]
pub struct Timeline<S> {
    fps: Fps,
    cursor_s: f64,
    sink: S,
}

impl<S: KeyframeSink> Timeline<S> {
    /// Timeline at cursor zero.
    pub fn new(fps: Fps, sink: S) -> Timeline<S> {
        Timeline {
            fps,
            cursor_s: 0.0,
            sink,
        }
    }

    /// Current cursor position in seconds.
    pub fn cursor_secs(&self) -> f64 {
        self.cursor_s
    }

    /// Frame rate used for instantaneous spans.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// The sink, for inspection.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the timeline, recovering the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Schedule behaviors over `duration_s` seconds, then advance.
    ///
    /// Every behavior shares the window; each transition keeps its own
    /// relative slice of it.
    #[tracing::instrument(skip(self, registry, arena, behaviors))]
    pub fn play(
        &mut self,
        registry: &DefinitionRegistry,
        arena: &mut InstanceArena,
        behaviors: Vec<Animation>,
        duration_s: f64,
    ) -> HoloformResult<()> {
        if !duration_s.is_finite() || duration_s <= 0.0 {
            return Err(HoloformError::animation(format!(
                "play duration must be positive and finite, got {duration_s}"
            )));
        }
        self.schedule(registry, arena, behaviors, duration_s)
    }

    /// Apply behaviors near-instantly over a two-frame span.
    ///
    /// Two frames is the shortest window that still gives the renderer a
    /// pair of distinct keyframes; the cursor advances by exactly that
    /// span.
    #[tracing::instrument(skip(self, registry, arena, behaviors))]
    pub fn set(
        &mut self,
        registry: &DefinitionRegistry,
        arena: &mut InstanceArena,
        behaviors: Vec<Animation>,
    ) -> HoloformResult<()> {
        let span = self.fps.frames_to_secs(2);
        self.schedule(registry, arena, behaviors, span)
    }

    /// Advance the cursor without scheduling anything.
    pub fn wait(&mut self, duration_s: f64) -> HoloformResult<()> {
        if !duration_s.is_finite() || duration_s < 0.0 {
            return Err(HoloformError::animation(format!(
                "wait duration must be non-negative and finite, got {duration_s}"
            )));
        }
        self.cursor_s += duration_s;
        Ok(())
    }

    fn schedule(
        &mut self,
        registry: &DefinitionRegistry,
        arena: &mut InstanceArena,
        behaviors: Vec<Animation>,
        duration_s: f64,
    ) -> HoloformResult<()> {
        let mut transitions: Vec<Transition> = Vec::new();
        for behavior in behaviors {
            transitions.extend(behavior.into_transitions());
        }
        for t in &transitions {
            t.check_window()?;
            let pair = KeyframePair {
                target: KeyTarget {
                    instance: t.target.instance,
                    param: t.target.name.clone(),
                },
                start_s: self.cursor_s + t.rel_start * duration_s,
                end_s: self.cursor_s + t.rel_stop * duration_s,
                value_initial: t.value_initial,
                value_final: t.value_final,
                ease: t.ease,
            };
            tracing::debug!(
                param = %pair.target.param,
                start_s = pair.start_s,
                end_s = pair.end_s,
                "keyframe pair"
            );
            self.sink.keyframe_pair(&pair)?;
        }
        for t in &transitions {
            arena.write(registry, t.target.instance, t.target.param, t.value_final)?;
        }
        self.cursor_s += duration_s;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;

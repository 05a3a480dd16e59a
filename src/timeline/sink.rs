use std::io::Write;

use crate::animation::ease::Ease;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::InstanceId;
use crate::param::kind::Value;

/// Addressed parameter slot as the renderer boundary sees it.
///
/// Parameters travel by name here: the consumer on the other side of the
/// sink has the definition's declaration, not this process's slot ids.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KeyTarget {
    /// Owning instance.
    pub instance: InstanceId,
    /// Parameter name on the instance's definition.
    pub param: String,
}

/// One scheduled transition: two absolute-time endpoints and a curve.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KeyframePair {
    /// Driven parameter.
    pub target: KeyTarget,
    /// Absolute start time in seconds.
    pub start_s: f64,
    /// Absolute end time in seconds.
    pub end_s: f64,
    /// Value at `start_s`.
    pub value_initial: Value,
    /// Value at `end_s`.
    pub value_final: Value,
    /// Resolved easing between the endpoints.
    pub ease: Ease,
}

/// A single absolute-time write request, half of a pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KeyframeWrite {
    /// Driven parameter.
    pub target: KeyTarget,
    /// Absolute time in seconds.
    pub time_s: f64,
    /// Value at that time.
    pub value: Value,
}

/// Renderer-facing consumer of scheduled keyframe pairs.
pub trait KeyframeSink {
    /// Accept one scheduled pair.
    fn keyframe_pair(&mut self, pair: &KeyframePair) -> HoloformResult<()>;
}

/// Sink keeping every submitted pair in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pairs: Vec<KeyframePair>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> RecordingSink {
        RecordingSink::default()
    }

    /// Every pair submitted so far, in submission order.
    pub fn pairs(&self) -> &[KeyframePair] {
        &self.pairs
    }

    /// The pairs flattened into single write requests, start then end for
    /// each pair in submission order.
    pub fn writes(&self) -> Vec<KeyframeWrite> {
        self.pairs
            .iter()
            .flat_map(|p| {
                [
                    KeyframeWrite {
                        target: p.target.clone(),
                        time_s: p.start_s,
                        value: p.value_initial,
                    },
                    KeyframeWrite {
                        target: p.target.clone(),
                        time_s: p.end_s,
                        value: p.value_final,
                    },
                ]
            })
            .collect()
    }
}

impl KeyframeSink for RecordingSink {
    fn keyframe_pair(&mut self, pair: &KeyframePair) -> HoloformResult<()> {
        self.pairs.push(pair.clone());
        Ok(())
    }
}

/// Sink writing one JSON object per pair, newline-delimited.
///
/// The transport shape a renderer bridge tails from a pipe or file.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> JsonLinesSink<W> {
        JsonLinesSink { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> KeyframeSink for JsonLinesSink<W> {
    fn keyframe_pair(&mut self, pair: &KeyframePair) -> HoloformResult<()> {
        serde_json::to_writer(&mut self.out, pair)
            .map_err(|err| HoloformError::serde(err.to_string()))?;
        self.out.write_all(b"\n").map_err(anyhow::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sink.rs"]
mod tests;

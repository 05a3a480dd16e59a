use crate::foundation::error::{HoloformError, HoloformResult};

/// Frame rate as an exact rational (frames per second).
///
/// The scheduler needs a frame rate for exactly one thing: the minimal
/// two-frame span used by instantaneous `set` calls. Keeping it rational
/// avoids drift for NTSC-style rates like 30000/1001.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> HoloformResult<Self> {
        if den == 0 {
            return Err(HoloformError::composition("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HoloformError::composition("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of `frames` frames in seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 * self.frame_duration_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use std::f64::consts::TAU;

use crate::foundation::error::{HoloformError, HoloformResult};

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Opaque white, the kind-level default for color parameters.
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Opaque black.
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a color from raw channels (validated on parameter write).
    pub fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    fn is_in_range(self) -> bool {
        let ok = |c: f64| c.is_finite() && (0.0..=1.0).contains(&c);
        ok(self.r) && ok(self.g) && ok(self.b)
    }

    fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    fn clamped(self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

/// Typed value carried by parameters, transitions and keyframes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Continuous scalar (lengths, angles, ratios).
    Scalar(f64),
    /// Whole-number count.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// RGB color.
    Color(Color),
}

impl Value {
    /// Return the scalar payload, if this is a scalar value.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn variant_name(self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Color(_) => "color",
        }
    }
}

/// Treatment of out-of-range parameter writes, fixed per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Out-of-range writes fail with a range error; the slot is untouched.
    #[default]
    Reject,
    /// Out-of-range writes are coerced into the domain (periodic kinds wrap).
    Clamp,
}

/// Semantic parameter kinds and their admissible domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Size, distance or radius; non-negative scalar.
    Length,
    /// Rotation in radians, `[0, 2π)`. Wraps under [`RangePolicy::Clamp`].
    Angle,
    /// Signed normalized scalar in `[-1, 1]`; 0 is neutral.
    Bipolar,
    /// Progress/opacity ratio in `[0, 1]`.
    Completion,
    /// RGB color, each channel in `[0, 1]`.
    Color,
    /// Whole-number count.
    Integer,
    /// Boolean flag.
    Bool,
}

impl ParamKind {
    /// Kind-level default used when a declaration supplies none.
    pub fn default_value(self) -> Value {
        match self {
            ParamKind::Length => Value::Scalar(100.0),
            ParamKind::Angle => Value::Scalar(0.0),
            ParamKind::Bipolar => Value::Scalar(0.0),
            ParamKind::Completion => Value::Scalar(0.0),
            ParamKind::Color => Value::Color(Color::WHITE),
            ParamKind::Integer => Value::Int(0),
            ParamKind::Bool => Value::Bool(false),
        }
    }

    /// Check `value` against this kind's domain, coercing per `policy`.
    ///
    /// Returns the admitted (possibly coerced) value. Non-finite scalars and
    /// variant mismatches are rejected under both policies; there is nothing
    /// meaningful to clamp them to.
    pub fn admit(self, value: Value, policy: RangePolicy) -> HoloformResult<Value> {
        match (self, value) {
            (ParamKind::Length, Value::Scalar(v)) => {
                let v = finite(self, v)?;
                if v >= 0.0 {
                    Ok(Value::Scalar(v))
                } else {
                    coerce(self, v, policy, v.max(0.0), "length must be >= 0")
                }
            }
            (ParamKind::Angle, Value::Scalar(v)) => {
                let v = finite(self, v)?;
                if (0.0..TAU).contains(&v) {
                    Ok(Value::Scalar(v))
                } else {
                    coerce(self, v, policy, v.rem_euclid(TAU), "angle must be in [0, 2π)")
                }
            }
            (ParamKind::Bipolar, Value::Scalar(v)) => {
                let v = finite(self, v)?;
                if (-1.0..=1.0).contains(&v) {
                    Ok(Value::Scalar(v))
                } else {
                    coerce(self, v, policy, v.clamp(-1.0, 1.0), "bipolar must be in [-1, 1]")
                }
            }
            (ParamKind::Completion, Value::Scalar(v)) => {
                let v = finite(self, v)?;
                if (0.0..=1.0).contains(&v) {
                    Ok(Value::Scalar(v))
                } else {
                    coerce(self, v, policy, v.clamp(0.0, 1.0), "completion must be in [0, 1]")
                }
            }
            (ParamKind::Color, Value::Color(c)) => {
                if c.is_in_range() {
                    Ok(Value::Color(c))
                } else if !c.is_finite() {
                    Err(HoloformError::range("color channels must be finite"))
                } else {
                    match policy {
                        RangePolicy::Clamp => Ok(Value::Color(c.clamped())),
                        RangePolicy::Reject => Err(HoloformError::range(
                            "color channels must be in [0, 1]",
                        )),
                    }
                }
            }
            (ParamKind::Integer, Value::Int(v)) => Ok(Value::Int(v)),
            (ParamKind::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (kind, other) => Err(HoloformError::range(format!(
                "{kind:?} parameter expects a {} value, got {}",
                kind.expected_variant(),
                other.variant_name()
            ))),
        }
    }

    fn expected_variant(self) -> &'static str {
        match self {
            ParamKind::Length | ParamKind::Angle | ParamKind::Bipolar | ParamKind::Completion => {
                "scalar"
            }
            ParamKind::Color => "color",
            ParamKind::Integer => "int",
            ParamKind::Bool => "bool",
        }
    }
}

fn finite(kind: ParamKind, v: f64) -> HoloformResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HoloformError::range(format!(
            "{kind:?} parameter value must be finite, got {v}"
        )))
    }
}

fn coerce(
    kind: ParamKind,
    raw: f64,
    policy: RangePolicy,
    coerced: f64,
    domain: &str,
) -> HoloformResult<Value> {
    match policy {
        RangePolicy::Clamp => Ok(Value::Scalar(coerced)),
        RangePolicy::Reject => Err(HoloformError::range(format!(
            "{kind:?} value {raw} out of range: {domain}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/param/kind.rs"]
mod tests;

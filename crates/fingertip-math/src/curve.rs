//! Keyframed animation curves.
//!
//! A curve is a piecewise cubic Hermite spline over `(time, value)` keys,
//! each key carrying its incoming and outgoing slope. Evaluation clamps
//! to the first/last key outside the key range. Values are not clamped,
//! so curves may encode rates (e.g. decay per second) as well as
//! `[0, 1]` easing.

use serde::{Deserialize, Serialize};

use fingertip_types::constants::EPSILON;

/// A single curve key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Key position on the input axis.
    pub time: f32,
    /// Curve value at `time`.
    pub value: f32,
    /// Slope arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Creates a flat key (zero tangents).
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// Creates a key with explicit tangents.
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Piecewise cubic Hermite curve. Keys are kept sorted by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Creates a curve from keys in any order.
    pub fn from_keys(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let span = t1 - t0;
        let slope = if span.abs() > EPSILON { (v1 - v0) / span } else { 0.0 };
        Self::from_keys(vec![
            Keyframe::with_tangents(t0, v0, slope, slope),
            Keyframe::with_tangents(t1, v1, slope, slope),
        ])
    }

    /// S-curve from `(t0, v0)` to `(t1, v1)` with flat ends (smoothstep).
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::from_keys(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// Curve that returns `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::from_keys(vec![Keyframe::new(0.0, value)])
    }

    /// The sorted keys.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Returns true when every key is finite.
    pub fn is_finite(&self) -> bool {
        self.keys.iter().all(|k| {
            k.time.is_finite()
                && k.value.is_finite()
                && k.in_tangent.is_finite()
                && k.out_tangent.is_finite()
        })
    }

    /// Evaluates the curve at `t`.
    ///
    /// An empty curve evaluates to 0.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t > first.time guarantees upper >= 1.
        let upper = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[upper - 1];
        let k1 = &self.keys[upper];

        let dt = k1.time - k0.time;
        if dt <= EPSILON {
            return k1.value;
        }
        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
    }
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }
}

impl From<Vec<Keyframe>> for AnimationCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<AnimationCurve> for Vec<Keyframe> {
    fn from(curve: AnimationCurve) -> Self {
        curve.keys
    }
}

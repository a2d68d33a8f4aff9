//! Time-driven progress curves.
//!
//! A [`ProgressCurve`] maps elapsed time since [`start`](ProgressCurve::start)
//! through an [`AnimationCurve`] over `[0, duration]`. Time comes from the
//! caller so the curve never reads a clock itself.

use serde::{Deserialize, Serialize};

use crate::curve::AnimationCurve;

/// An easing curve played over a fixed duration.
///
/// A curve that was never started (or was ended) reports its final value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressCurve {
    /// Shape of the progress, sampled over `[0, 1]`.
    pub curve: AnimationCurve,
    /// Playback duration in seconds.
    pub duration: f64,
    #[serde(skip)]
    started_at: Option<f64>,
}

impl ProgressCurve {
    /// Creates an idle progress curve.
    pub fn new(curve: AnimationCurve, duration: f64) -> Self {
        Self {
            curve,
            duration,
            started_at: None,
        }
    }

    /// Smoothstep from 0 to 1 over `duration` seconds.
    pub fn ease_in_out(duration: f64) -> Self {
        Self::new(AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0), duration)
    }

    /// Restarts playback at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    /// Stops playback; progress jumps to the final value.
    pub fn end(&mut self) {
        self.started_at = None;
    }

    /// Returns true while playback is running at `now`.
    pub fn is_running(&self, now: f64) -> bool {
        match self.started_at {
            Some(start) => self.duration > 0.0 && now - start < self.duration,
            None => false,
        }
    }

    /// Curve value at `now`.
    pub fn progress(&self, now: f64) -> f32 {
        let Some(start) = self.started_at else {
            return self.curve.evaluate(1.0);
        };
        if self.duration <= 0.0 {
            return self.curve.evaluate(1.0);
        }
        let t = ((now - start) / self.duration).clamp(0.0, 1.0) as f32;
        self.curve.evaluate(t)
    }
}

impl Default for ProgressCurve {
    fn default() -> Self {
        Self::ease_in_out(0.1)
    }
}

//! Touch-point tracking for an active selection.
//!
//! Per-frame pipeline while selected:
//! 1. **Drag thresholding**: hold the target at an anchor until lateral
//!    travel clearly exceeds depth change
//! 2. **Position pinning**: damp small offsets from the first touch
//! 3. **Drag easing**: blend the reported point towards the pinned one
//! 4. **Recoil assist**: detect a pull-back from the deepest press
//!
//! All points are in the selected surface's local space; distances are
//! measured in world space through the surface transform.

use fingertip_math::vector::{inverse_lerp, lerp};
use fingertip_math::{ProgressCurve, SurfaceTransform, Vec3};
use fingertip_types::constants::EPSILON;

use crate::config::{PositionPinningConfig, RecoilAssistConfig, TouchableConfig};

/// One frame of input to the tracker.
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    /// Closest backing point, surface-local.
    pub local_point: Vec3,
    /// Press depth, never negative.
    pub depth: f32,
    /// Probe motion since the previous frame (world).
    pub frame_delta: Vec3,
    /// Backing normal (world).
    pub normal: Vec3,
    /// Seconds since the previous frame.
    pub dt: f32,
    pub now: f64,
}

/// Offsets `target` from `first` by a damped amount.
///
/// The applied offset is `min(|d|, max_pin) * ease(|d| / max_pin)` along
/// the raw offset `d`, so it never exceeds `max_pin_distance`.
pub fn pin_touch_point(
    first: Vec3,
    target: Vec3,
    config: &PositionPinningConfig,
    frame: &dyn SurfaceTransform,
) -> Vec3 {
    let delta = target - first;
    let world_length = frame.world_vector(delta).length();
    if world_length <= EPSILON || config.max_pin_distance <= 0.0 {
        return target;
    }
    let percent = (world_length / config.max_pin_distance).clamp(0.0, 1.0);
    let ease = config.pinning_ease_curve.evaluate(percent).clamp(0.0, 1.0);
    let pinned_length = world_length.min(config.max_pin_distance) * ease;
    first + delta * (pinned_length / world_length)
}

/// Advances `eased` towards `pinned` by the share of the remaining
/// progress covered since the last frame.
pub fn ease_toward(eased: Vec3, pinned: Vec3, progress: f32, previous_progress: f32) -> Vec3 {
    if previous_progress >= 1.0 || progress >= 1.0 {
        return pinned;
    }
    let fraction = ((progress - previous_progress) / (1.0 - previous_progress)).clamp(0.0, 1.0);
    eased + (pinned - eased) * fraction
}

/// Per-selection touch state.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    first_touch: Vec3,
    target: Vec3,
    pinned: Vec3,
    eased: Vec3,
    drag_anchor: Vec3,
    previous_point: Vec3,
    previous_depth: f32,
    dragging: bool,

    drag_curve: ProgressCurve,
    previous_drag_progress: f32,

    recoiled: bool,
    select_max_depth: f32,
    velocity_expansion: f32,
    re_enter_depth: f32,
    resync_curve: ProgressCurve,
    resync_from: Vec3,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self {
            first_touch: Vec3::ZERO,
            target: Vec3::ZERO,
            pinned: Vec3::ZERO,
            eased: Vec3::ZERO,
            drag_anchor: Vec3::ZERO,
            previous_point: Vec3::ZERO,
            previous_depth: 0.0,
            dragging: false,
            drag_curve: ProgressCurve::default(),
            previous_drag_progress: 1.0,
            recoiled: false,
            select_max_depth: 0.0,
            velocity_expansion: 0.0,
            re_enter_depth: 0.0,
            resync_curve: ProgressCurve::default(),
            resync_from: Vec3::ZERO,
        }
    }

    /// Starts tracking a new selection at `local_point`.
    pub fn begin(&mut self, local_point: Vec3, depth: f32, config: &TouchableConfig) {
        self.first_touch = local_point;
        self.target = local_point;
        self.pinned = local_point;
        self.eased = local_point;
        self.drag_anchor = local_point;
        self.previous_point = local_point;
        self.previous_depth = depth;
        self.dragging = false;

        self.drag_curve = config.drag_thresholds.drag_ease_curve.clone();
        self.drag_curve.end();
        self.previous_drag_progress = 1.0;

        self.recoiled = false;
        self.select_max_depth = depth;
        self.velocity_expansion = 0.0;
        self.re_enter_depth = 0.0;
        self.resync_curve = config.position_pinning.resync_curve.clone();
        self.resync_curve.end();
        self.resync_from = local_point;

        tracing::trace!(depth, "touch tracking started");
    }

    /// Runs drag thresholding, pinning and easing for one frame.
    pub fn track(&mut self, sample: &TouchSample, config: &TouchableConfig, frame: &dyn SurfaceTransform) {
        self.update_drag(sample, config, frame);

        let pin = &config.position_pinning;
        self.pinned = if !pin.enabled {
            self.target
        } else if self.recoiled {
            let progress = self.resync_curve.progress(sample.now).clamp(0.0, 1.0);
            self.resync_from.lerp(self.target, progress)
        } else {
            pin_touch_point(self.first_touch, self.target, pin, frame)
        };

        let progress = self.drag_curve.progress(sample.now);
        self.eased = ease_toward(self.eased, self.pinned, progress, self.previous_drag_progress);
        self.previous_drag_progress = progress;

        self.previous_point = sample.local_point;
        self.previous_depth = sample.depth;
    }

    fn update_drag(&mut self, sample: &TouchSample, config: &TouchableConfig, frame: &dyn SurfaceTransform) {
        let drag = &config.drag_thresholds;
        if !drag.enabled {
            self.target = sample.local_point;
            return;
        }

        let depth_delta = (sample.depth - self.previous_depth).abs();
        let lateral_delta = frame.world_vector(sample.local_point - self.previous_point).length();
        let z_motion = depth_delta > lateral_delta && depth_delta > drag.drag_normal;
        if z_motion {
            self.drag_anchor = sample.local_point;
        }

        if self.dragging {
            if z_motion {
                self.dragging = false;
                tracing::trace!("drag stopped by depth motion");
            }
        } else if !z_motion {
            let from_anchor = frame.world_vector(sample.local_point - self.drag_anchor).length();
            if from_anchor > drag.drag_tangent {
                self.dragging = true;
                self.drag_curve.start(sample.now);
                self.previous_drag_progress = 0.0;
                tracing::trace!(from_anchor, "drag started");
            }
        }

        self.target = if self.dragging { sample.local_point } else { self.drag_anchor };
    }

    /// Updates the recoil trackers; returns true when the probe has pulled
    /// back far enough to recoil.
    pub fn should_recoil(&mut self, sample: &TouchSample, config: &TouchableConfig) -> bool {
        let recoil = &config.recoil_assist;
        if !recoil.enabled || self.recoiled {
            return false;
        }

        if recoil.use_velocity_expansion {
            self.update_velocity_expansion(sample, recoil);
        }

        if recoil.use_dynamic_decay {
            let motion = sample.frame_delta.length();
            if motion > EPSILON && sample.dt > 0.0 {
                let normal_ratio = sample.frame_delta.dot(sample.normal).abs() / motion;
                let rate = recoil.dynamic_decay_curve.evaluate(normal_ratio);
                let t = (rate * sample.dt).clamp(0.0, 1.0);
                self.select_max_depth = lerp(self.select_max_depth, sample.depth, t);
            }
        }

        if sample.depth > self.select_max_depth {
            self.select_max_depth = sample.depth;
            return false;
        }

        let exit = recoil.exit_distance + self.velocity_expansion;
        sample.depth < self.select_max_depth - exit
    }

    fn update_velocity_expansion(&mut self, sample: &TouchSample, recoil: &RecoilAssistConfig) {
        if sample.dt <= 0.0 {
            return;
        }
        let outward_speed = sample.frame_delta.dot(sample.normal).max(0.0) / sample.dt;
        let t = if outward_speed <= recoil.velocity_expansion_min_speed {
            0.0
        } else {
            inverse_lerp(
                recoil.velocity_expansion_min_speed,
                recoil.velocity_expansion_max_speed,
                outward_speed,
            )
        };
        let target = t * recoil.velocity_expansion_distance;
        self.velocity_expansion = if target > self.velocity_expansion {
            target
        } else {
            (self.velocity_expansion - recoil.velocity_expansion_decay_rate * sample.dt).max(target)
        };
    }

    /// Enters the recoiled state at `depth`.
    pub fn begin_recoil(&mut self, depth: f32, config: &TouchableConfig, now: f64) {
        self.recoiled = true;
        self.re_enter_depth = depth + config.recoil_assist.re_enter_distance;
        self.resync_from = self.pinned;
        self.resync_curve.start(now);
        tracing::debug!(depth, re_enter_depth = self.re_enter_depth, "recoil");
    }

    /// Leaves the recoiled state without re-selecting.
    pub fn end_recoil(&mut self) {
        self.recoiled = false;
        self.resync_curve.end();
    }

    /// Returns true when a recoiled probe has pressed back in past the
    /// re-enter depth.
    pub fn should_reenter(&self, depth: f32) -> bool {
        self.recoiled && depth > self.re_enter_depth
    }

    /// Surface-local point of first contact.
    pub fn first_touch(&self) -> Vec3 {
        self.first_touch
    }

    /// Target after drag thresholding.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Target after pinning.
    pub fn pinned(&self) -> Vec3 {
        self.pinned
    }

    /// Reported touch point.
    pub fn touch_point(&self) -> Vec3 {
        self.eased
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_recoiled(&self) -> bool {
        self.recoiled
    }

    pub fn select_max_depth(&self) -> f32 {
        self.select_max_depth
    }

    pub fn velocity_expansion(&self) -> f32 {
        self.velocity_expansion
    }

    pub fn re_enter_depth(&self) -> f32 {
        self.re_enter_depth
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new()
    }
}

//! Probe and touchable configuration.
//!
//! Plain data with documented defaults. A touchable's configuration is
//! normalized once when it is registered (see [`TouchableConfig::normalized`]);
//! the resolution passes never re-validate it per frame.

use serde::{Deserialize, Serialize};

use fingertip_math::{AnimationCurve, Keyframe, ProgressCurve};
use fingertip_types::constants::{
    DEFAULT_CANCEL_SELECT_NORMAL, DEFAULT_CANCEL_SELECT_TANGENT, DEFAULT_CLOSE_DISTANCE_THRESHOLD,
    DEFAULT_ENTER_HOVER_NORMAL, DEFAULT_ENTER_HOVER_TANGENT, DEFAULT_EQUAL_DISTANCE_THRESHOLD,
    DEFAULT_EXIT_HOVER_NORMAL, DEFAULT_EXIT_HOVER_TANGENT, DEFAULT_PROBE_RADIUS,
    DEFAULT_TOUCH_RELEASE_THRESHOLD, EPSILON,
};
use fingertip_types::{FingertipError, FingertipResult};

fn require_distance(name: &str, value: f32) -> FingertipResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FingertipError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

fn require_curve(name: &str, curve: &AnimationCurve) -> FingertipResult<()> {
    if !curve.is_finite() {
        return Err(FingertipError::InvalidConfig(format!("{name} has non-finite keys")));
    }
    Ok(())
}

fn require_progress(name: &str, curve: &ProgressCurve) -> FingertipResult<()> {
    require_curve(name, &curve.curve)?;
    if !curve.duration.is_finite() || curve.duration < 0.0 {
        return Err(FingertipError::InvalidConfig(format!(
            "{name} duration must be finite and non-negative, got {}",
            curve.duration
        )));
    }
    Ok(())
}

/// Configuration of a probe (the poking sphere).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Sphere radius around the probe origin.
    pub radius: f32,

    /// Clearance above the backing surface at which a selection is released.
    pub touch_release_threshold: f32,

    /// Extra slack added to the range pre-filter.
    pub equal_distance_threshold: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_PROBE_RADIUS,
            touch_release_threshold: DEFAULT_TOUCH_RELEASE_THRESHOLD,
            equal_distance_threshold: DEFAULT_EQUAL_DISTANCE_THRESHOLD,
        }
    }
}

impl ProbeConfig {
    /// Validates the configuration.
    pub fn normalized(self) -> FingertipResult<Self> {
        require_distance("radius", self.radius)?;
        require_distance("touch_release_threshold", self.touch_release_threshold)?;
        require_distance("equal_distance_threshold", self.equal_distance_threshold)?;
        Ok(self)
    }
}

/// Optional minimum clearance before hover may begin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinThresholdsConfig {
    pub enabled: bool,
    /// Distance above the backing surface the probe must exceed to enter hover.
    pub min_normal: f32,
}

impl Default for MinThresholdsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_normal: 0.01,
        }
    }
}

/// Separates depth presses from lateral drags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragThresholdsConfig {
    pub enabled: bool,

    /// Per-frame depth change that counts as Z-motion.
    pub drag_normal: f32,

    /// Lateral travel from the drag anchor that starts a drag.
    pub drag_tangent: f32,

    /// Easing of the touch point after a drag starts.
    pub drag_ease_curve: ProgressCurve,
}

impl Default for DragThresholdsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drag_normal: 0.01,
            drag_tangent: 0.01,
            drag_ease_curve: ProgressCurve::ease_in_out(0.05),
        }
    }
}

/// Damps the first lateral motion after touch-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionPinningConfig {
    pub enabled: bool,

    /// Largest offset the pinned point may take from the first touch.
    pub max_pin_distance: f32,

    /// Maps `offset / max_pin_distance` to the fraction of the offset applied.
    pub pinning_ease_curve: AnimationCurve,

    /// Resync of the pinned point towards the target while recoiled.
    pub resync_curve: ProgressCurve,
}

impl Default for PositionPinningConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_pin_distance: 0.075,
            pinning_ease_curve: AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0),
            resync_curve: ProgressCurve::ease_in_out(0.2),
        }
    }
}

/// Early unselect when the probe pulls back after pressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilAssistConfig {
    pub enabled: bool,

    /// Let the max-depth tracker creep towards the current depth.
    pub use_dynamic_decay: bool,

    /// Decay rate (per second) as a function of `|normal motion| / |motion|`.
    pub dynamic_decay_curve: AnimationCurve,

    /// Widen the exit distance while the probe moves outward fast.
    pub use_velocity_expansion: bool,

    /// Outward speed (m/s) where expansion starts.
    pub velocity_expansion_min_speed: f32,

    /// Outward speed (m/s) where expansion is full.
    pub velocity_expansion_max_speed: f32,

    /// Expansion added to the exit distance at full speed.
    pub velocity_expansion_distance: f32,

    /// Expansion shrink rate (m/s) once the probe slows.
    pub velocity_expansion_decay_rate: f32,

    /// Pull-back from the deepest point that triggers recoil.
    pub exit_distance: f32,

    /// Depth past the recoil point needed to select again.
    pub re_enter_distance: f32,
}

impl Default for RecoilAssistConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            use_dynamic_decay: false,
            dynamic_decay_curve: AnimationCurve::from_keys(vec![
                Keyframe::new(0.0, 50.0),
                Keyframe::new(0.9, 0.5),
            ]),
            use_velocity_expansion: false,
            velocity_expansion_min_speed: 0.4,
            velocity_expansion_max_speed: 1.4,
            velocity_expansion_distance: 0.055,
            velocity_expansion_decay_rate: 0.125,
            exit_distance: 0.02,
            re_enter_distance: 0.02,
        }
    }
}

/// Thresholds and assists of one touchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchableConfig {
    /// Normal distance at which hover begins.
    pub enter_hover_normal: f32,
    /// Tangent distance off the patch at which hover begins.
    pub enter_hover_tangent: f32,
    /// Normal distance at which hover ends. Never below `enter_hover_normal`.
    pub exit_hover_normal: f32,
    /// Tangent distance at which hover ends. Never below `enter_hover_tangent`.
    pub exit_hover_tangent: f32,

    /// Press depth that cancels a selection (0 disables).
    pub cancel_select_normal: f32,
    /// Lateral distance off the patch that cancels a selection (0 disables).
    pub cancel_select_tangent: f32,

    pub min_thresholds: MinThresholdsConfig,
    pub drag_thresholds: DragThresholdsConfig,
    pub position_pinning: PositionPinningConfig,
    pub recoil_assist: RecoilAssistConfig,

    /// Higher wins when candidates are otherwise tied.
    pub tiebreaker_score: i32,

    /// Distance band inside which candidates count as equally close.
    pub close_distance_threshold: f32,
}

impl Default for TouchableConfig {
    fn default() -> Self {
        Self {
            enter_hover_normal: DEFAULT_ENTER_HOVER_NORMAL,
            enter_hover_tangent: DEFAULT_ENTER_HOVER_TANGENT,
            exit_hover_normal: DEFAULT_EXIT_HOVER_NORMAL,
            exit_hover_tangent: DEFAULT_EXIT_HOVER_TANGENT,
            cancel_select_normal: DEFAULT_CANCEL_SELECT_NORMAL,
            cancel_select_tangent: DEFAULT_CANCEL_SELECT_TANGENT,
            min_thresholds: MinThresholdsConfig::default(),
            drag_thresholds: DragThresholdsConfig::default(),
            position_pinning: PositionPinningConfig::default(),
            recoil_assist: RecoilAssistConfig::default(),
            tiebreaker_score: 0,
            close_distance_threshold: DEFAULT_CLOSE_DISTANCE_THRESHOLD,
        }
    }
}

impl TouchableConfig {
    /// Push button: drag thresholding on, no pinning, no recoil.
    pub fn button() -> Self {
        Self::default()
    }

    /// Scrollable panel: pinning plus recoil with dynamic decay, so
    /// sideways swipes do not end the touch early.
    pub fn scroll_surface() -> Self {
        Self {
            enter_hover_tangent: 0.0,
            cancel_select_tangent: 0.0,
            position_pinning: PositionPinningConfig {
                enabled: true,
                ..Default::default()
            },
            recoil_assist: RecoilAssistConfig {
                enabled: true,
                use_dynamic_decay: true,
                use_velocity_expansion: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Validates values and repairs inconsistent ones.
    ///
    /// Non-finite or negative distances are rejected. Exit hover distances
    /// below their enter counterparts are raised to match and an inverted
    /// velocity-expansion speed range is collapsed. Velocity expansion with
    /// a zero full-expansion speed is rejected. Pinning with a non-positive
    /// pin distance is switched off.
    pub fn normalized(mut self) -> FingertipResult<Self> {
        require_distance("enter_hover_normal", self.enter_hover_normal)?;
        require_distance("enter_hover_tangent", self.enter_hover_tangent)?;
        require_distance("exit_hover_normal", self.exit_hover_normal)?;
        require_distance("exit_hover_tangent", self.exit_hover_tangent)?;
        require_distance("cancel_select_normal", self.cancel_select_normal)?;
        require_distance("cancel_select_tangent", self.cancel_select_tangent)?;
        require_distance("close_distance_threshold", self.close_distance_threshold)?;
        require_distance("min_thresholds.min_normal", self.min_thresholds.min_normal)?;

        let drag = &self.drag_thresholds;
        require_distance("drag_thresholds.drag_normal", drag.drag_normal)?;
        require_distance("drag_thresholds.drag_tangent", drag.drag_tangent)?;
        require_progress("drag_thresholds.drag_ease_curve", &drag.drag_ease_curve)?;

        let pin = &self.position_pinning;
        require_distance("position_pinning.max_pin_distance", pin.max_pin_distance)?;
        require_curve("position_pinning.pinning_ease_curve", &pin.pinning_ease_curve)?;
        require_progress("position_pinning.resync_curve", &pin.resync_curve)?;

        let recoil = &self.recoil_assist;
        require_curve("recoil_assist.dynamic_decay_curve", &recoil.dynamic_decay_curve)?;
        require_distance("recoil_assist.velocity_expansion_min_speed", recoil.velocity_expansion_min_speed)?;
        require_distance("recoil_assist.velocity_expansion_max_speed", recoil.velocity_expansion_max_speed)?;
        require_distance("recoil_assist.velocity_expansion_distance", recoil.velocity_expansion_distance)?;
        require_distance("recoil_assist.velocity_expansion_decay_rate", recoil.velocity_expansion_decay_rate)?;
        require_distance("recoil_assist.exit_distance", recoil.exit_distance)?;
        require_distance("recoil_assist.re_enter_distance", recoil.re_enter_distance)?;

        if self.exit_hover_normal < self.enter_hover_normal {
            tracing::warn!(
                enter = self.enter_hover_normal,
                exit = self.exit_hover_normal,
                "exit_hover_normal below enter_hover_normal, clamping"
            );
            self.exit_hover_normal = self.enter_hover_normal;
        }
        if self.exit_hover_tangent < self.enter_hover_tangent {
            tracing::warn!(
                enter = self.enter_hover_tangent,
                exit = self.exit_hover_tangent,
                "exit_hover_tangent below enter_hover_tangent, clamping"
            );
            self.exit_hover_tangent = self.enter_hover_tangent;
        }

        let recoil = &mut self.recoil_assist;
        if recoil.velocity_expansion_max_speed < recoil.velocity_expansion_min_speed {
            tracing::warn!(
                min = recoil.velocity_expansion_min_speed,
                max = recoil.velocity_expansion_max_speed,
                "velocity expansion speed range inverted, clamping max to min"
            );
            recoil.velocity_expansion_max_speed = recoil.velocity_expansion_min_speed;
        }
        if recoil.use_velocity_expansion && recoil.velocity_expansion_max_speed <= EPSILON {
            return Err(FingertipError::InvalidConfig(format!(
                "recoil_assist.velocity_expansion_max_speed must be positive, got {}",
                recoil.velocity_expansion_max_speed
            )));
        }

        let pin = &mut self.position_pinning;
        if pin.enabled && pin.max_pin_distance <= 0.0 {
            tracing::warn!("position pinning enabled with zero max_pin_distance, disabling");
            pin.enabled = false;
        }

        Ok(self)
    }

    /// Hover thresholds `(normal, tangent)`; exit thresholds when `was_candidate`.
    #[inline]
    pub fn hover_thresholds(&self, was_candidate: bool) -> (f32, f32) {
        if was_candidate {
            (self.exit_hover_normal, self.exit_hover_tangent)
        } else {
            (self.enter_hover_normal, self.enter_hover_tangent)
        }
    }
}

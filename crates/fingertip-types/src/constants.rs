//! Tuning defaults for probes and touchables (meters and seconds).

/// Default probe sphere radius.
pub const DEFAULT_PROBE_RADIUS: f32 = 0.005;

/// Clearance above the backing surface at which a selection is released.
pub const DEFAULT_TOUCH_RELEASE_THRESHOLD: f32 = 0.002;

/// Probe-level slack added to the range pre-filter.
pub const DEFAULT_EQUAL_DISTANCE_THRESHOLD: f32 = 0.001;

/// Normal distance at which hover begins.
pub const DEFAULT_ENTER_HOVER_NORMAL: f32 = 0.015;

/// Tangent distance at which hover begins (0 = probe must be over the patch).
pub const DEFAULT_ENTER_HOVER_TANGENT: f32 = 0.0;

/// Normal distance at which hover ends.
pub const DEFAULT_EXIT_HOVER_NORMAL: f32 = 0.02;

/// Tangent distance at which hover ends.
pub const DEFAULT_EXIT_HOVER_TANGENT: f32 = 0.0;

/// Press depth beyond which a selection is cancelled.
pub const DEFAULT_CANCEL_SELECT_NORMAL: f32 = 0.3;

/// Lateral distance off the patch beyond which a selection is cancelled.
pub const DEFAULT_CANCEL_SELECT_TANGENT: f32 = 0.03;

/// Distance band inside which two candidates count as equally close.
pub const DEFAULT_CLOSE_DISTANCE_THRESHOLD: f32 = 0.001;

/// Default host frame interval used by procedural scenarios (72 Hz).
pub const DEFAULT_FRAME_DT: f64 = 1.0 / 72.0;

/// Epsilon for degenerate vectors and divisions.
pub const EPSILON: f32 = 1.0e-6;

//! Small scalar and vector helpers shared by the resolution passes.

use glam::Vec3;

/// Removes the component of `v` along the unit normal `n`.
#[inline]
pub fn project_on_plane(v: Vec3, n: Vec3) -> Vec3 {
    v - n * v.dot(n)
}

/// Linear interpolation between `a` and `b`, `t` unclamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` within `[a, b]`, clamped to `[0, 1]`.
///
/// A degenerate range returns 0 below `a` and 1 at or above it.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        return if value >= a { 1.0 } else { 0.0 };
    }
    ((value - a) / span).clamp(0.0, 1.0)
}

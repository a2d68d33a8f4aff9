//! Rays for swept-probe surface queries.

use glam::Vec3;

use fingertip_types::constants::EPSILON;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point (world space).
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray. `direction` is expected to be unit length.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Builds the ray from `from` towards `to` together with the travel distance.
    ///
    /// Returns `None` for a zero-length segment, which has no direction.
    pub fn between(from: Vec3, to: Vec3) -> Option<(Self, f32)> {
        let delta = to - from;
        let length = delta.length();
        if length <= EPSILON {
            return None;
        }
        Some((Self::new(from, delta / length), length))
    }

    /// Point at `distance` along the ray.
    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

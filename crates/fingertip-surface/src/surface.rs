//! Surface query trait.

use fingertip_math::{Ray, SurfaceFrame, Vec3};

/// Result of a surface query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Hit or closest point (world space).
    pub point: Vec3,
    /// Outward unit normal at `point`.
    pub normal: Vec3,
    /// Distance from the query point (closest point) or ray origin (raycast).
    pub distance: f32,
}

/// Trait for touchable geometry.
///
/// Implementations must be pure functions of their current transform:
/// the engine caches results per frame and assumes repeated queries with
/// the same input return the same hit.
///
/// # Implementations
/// - [`PlaneSurface`](crate::plane::PlaneSurface): unbounded plane (typical backing)
/// - [`RectSurface`](crate::rect::RectSurface): bounded rectangle (typical patch)
/// - [`NullSurface`]: never hits
pub trait Surface: Send + Sync {
    /// The surface's local frame.
    fn transform(&self) -> &SurfaceFrame;

    /// Moves the surface.
    fn set_transform(&mut self, frame: SurfaceFrame);

    /// Nearest point on the surface to `point`.
    fn closest_point(&self, point: Vec3) -> Option<SurfaceHit>;

    /// First front-face hit along `ray` no farther than `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit>;

    /// Returns the surface kind name.
    fn name(&self) -> &str;
}

/// Surface that never reports a hit.
#[derive(Debug, Clone, Default)]
pub struct NullSurface {
    frame: SurfaceFrame,
}

impl NullSurface {
    /// Creates a null surface at `frame`.
    pub fn new(frame: SurfaceFrame) -> Self {
        Self { frame }
    }
}

impl Surface for NullSurface {
    fn transform(&self) -> &SurfaceFrame {
        &self.frame
    }

    fn set_transform(&mut self, frame: SurfaceFrame) {
        self.frame = frame;
    }

    fn closest_point(&self, _point: Vec3) -> Option<SurfaceHit> {
        None
    }

    fn raycast(&self, _ray: &Ray, _max_distance: f32) -> Option<SurfaceHit> {
        None
    }

    fn name(&self) -> &str {
        "null_surface"
    }
}

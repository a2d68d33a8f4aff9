//! Unbounded plane surface.
//!
//! The plane passes through the frame origin; local +Z is the outward
//! normal. Raycasts only hit the front face, so a probe can never press
//! a plane from behind.

use fingertip_math::{Ray, SurfaceFrame, Vec3};
use fingertip_types::constants::EPSILON;

use crate::surface::{Surface, SurfaceHit};

/// Infinite plane through the frame origin, facing local +Z.
#[derive(Debug, Clone, Default)]
pub struct PlaneSurface {
    frame: SurfaceFrame,
}

impl PlaneSurface {
    /// Creates a plane at `frame`.
    pub fn new(frame: SurfaceFrame) -> Self {
        Self { frame }
    }

    /// Outward unit normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.frame.forward()
    }

    /// Signed distance of `point` above the plane.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.frame.origin()).dot(self.normal())
    }
}

impl Surface for PlaneSurface {
    fn transform(&self) -> &SurfaceFrame {
        &self.frame
    }

    fn set_transform(&mut self, frame: SurfaceFrame) {
        self.frame = frame;
    }

    fn closest_point(&self, point: Vec3) -> Option<SurfaceHit> {
        let normal = self.normal();
        let above = self.signed_distance(point);
        Some(SurfaceHit {
            point: point - normal * above,
            normal,
            distance: above.abs(),
        })
    }

    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        let normal = self.normal();
        let denom = ray.direction.dot(normal);
        // Parallel, or leaving through the front face.
        if denom >= -EPSILON {
            return None;
        }
        let t = (self.frame.origin() - ray.origin).dot(normal) / denom;
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(SurfaceHit {
            point: ray.at(t),
            normal,
            distance: t,
        })
    }

    fn name(&self) -> &str {
        "plane"
    }
}

//! Bounded rectangle surface.
//!
//! A plane clipped to `|x| <= half_extents.x`, `|y| <= half_extents.y` in
//! local space. Closest-point queries clamp onto the rectangle, which is
//! what makes the patch the source of lateral (tangent) distance.

use fingertip_math::{Ray, SurfaceFrame, SurfaceTransform, Vec2, Vec3};

use crate::plane::PlaneSurface;
use crate::surface::{Surface, SurfaceHit};

/// Rectangle centred on the frame origin in the local XY plane.
#[derive(Debug, Clone)]
pub struct RectSurface {
    plane: PlaneSurface,
    half_extents: Vec2,
}

impl RectSurface {
    /// Creates a rectangle. Negative extents are treated as their magnitude.
    pub fn new(frame: SurfaceFrame, half_extents: Vec2) -> Self {
        Self {
            plane: PlaneSurface::new(frame),
            half_extents: half_extents.abs(),
        }
    }

    /// Half width and half height in local units.
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    fn contains_local(&self, local: Vec3) -> bool {
        local.x.abs() <= self.half_extents.x + 1e-6 && local.y.abs() <= self.half_extents.y + 1e-6
    }
}

impl Surface for RectSurface {
    fn transform(&self) -> &SurfaceFrame {
        self.plane.transform()
    }

    fn set_transform(&mut self, frame: SurfaceFrame) {
        self.plane.set_transform(frame);
    }

    fn closest_point(&self, point: Vec3) -> Option<SurfaceHit> {
        let frame = self.plane.transform();
        let local = frame.local_point(point);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            0.0,
        );
        let world = frame.world_point(clamped);
        Some(SurfaceHit {
            point: world,
            normal: self.plane.normal(),
            distance: (point - world).length(),
        })
    }

    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        let hit = self.plane.raycast(ray, max_distance)?;
        let local = self.plane.transform().local_point(hit.point);
        self.contains_local(local).then_some(hit)
    }

    fn name(&self) -> &str {
        "rect"
    }
}

//! Surface frames: the local coordinate system of a touchable.
//!
//! Touch points are tracked in surface-local space so they stay attached
//! to a surface that moves between frames. [`SurfaceTransform`] is the
//! query seam the engine consumes; [`SurfaceFrame`] is the stock
//! implementation, caching the inverse so both directions are one multiply.

use glam::{Affine3A, Quat, Vec3};

/// World↔local point and vector transforms for a surface.
pub trait SurfaceTransform {
    /// World point → local point.
    fn local_point(&self, world: Vec3) -> Vec3;

    /// Local point → world point.
    fn world_point(&self, local: Vec3) -> Vec3;

    /// World vector → local vector (no translation).
    fn local_vector(&self, world: Vec3) -> Vec3;

    /// Local vector → world vector (no translation).
    fn world_vector(&self, local: Vec3) -> Vec3;
}

/// Affine frame with a cached inverse.
///
/// Local +Z is the outward surface normal for the planar surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    to_world: Affine3A,
    to_local: Affine3A,
}

impl SurfaceFrame {
    /// The identity frame.
    pub const IDENTITY: Self = Self {
        to_world: Affine3A::IDENTITY,
        to_local: Affine3A::IDENTITY,
    };

    /// Creates a frame from a local→world affine transform.
    pub fn from_affine(to_world: Affine3A) -> Self {
        Self {
            to_world,
            to_local: to_world.inverse(),
        }
    }

    /// Creates a rigid frame.
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self::from_affine(Affine3A::from_rotation_translation(rotation, translation))
    }

    /// Creates an unrotated frame at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_affine(Affine3A::from_translation(translation))
    }

    /// Creates a frame at `origin` whose local +Z points along `normal`.
    ///
    /// A zero normal falls back to world +Z.
    pub fn facing(origin: Vec3, normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Z);
        Self::from_rotation_translation(Quat::from_rotation_arc(Vec3::Z, normal), origin)
    }

    /// Local→world affine transform.
    #[inline]
    pub fn to_world(&self) -> Affine3A {
        self.to_world
    }

    /// World-space origin of the frame.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        Vec3::from(self.to_world.translation)
    }

    /// World-space direction of local +Z, normalized.
    pub fn forward(&self) -> Vec3 {
        self.to_world
            .transform_vector3(Vec3::Z)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }
}

impl Default for SurfaceFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SurfaceTransform for SurfaceFrame {
    #[inline]
    fn local_point(&self, world: Vec3) -> Vec3 {
        self.to_local.transform_point3(world)
    }

    #[inline]
    fn world_point(&self, local: Vec3) -> Vec3 {
        self.to_world.transform_point3(local)
    }

    #[inline]
    fn local_vector(&self, world: Vec3) -> Vec3 {
        self.to_local.transform_vector3(world)
    }

    #[inline]
    fn world_vector(&self, local: Vec3) -> Vec3 {
        self.to_world.transform_vector3(local)
    }
}

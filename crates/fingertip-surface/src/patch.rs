//! Patch/backing surface pairs.

use std::fmt;

use fingertip_math::{SurfaceFrame, Vec2};

use crate::plane::PlaneSurface;
use crate::rect::RectSurface;
use crate::surface::Surface;

/// The two surfaces of a touchable.
///
/// The patch answers "is the probe over the pokeable area"; the backing
/// answers "how deep is the probe". Depth is never measured against the
/// patch.
pub struct SurfacePatch {
    patch: Box<dyn Surface>,
    backing: Box<dyn Surface>,
}

impl SurfacePatch {
    /// Pairs a patch with its backing surface.
    pub fn new(patch: Box<dyn Surface>, backing: Box<dyn Surface>) -> Self {
        Self { patch, backing }
    }

    /// Flat button: rectangle patch over an unbounded backing plane.
    pub fn flat_rect(frame: SurfaceFrame, half_extents: Vec2) -> Self {
        Self::new(
            Box::new(RectSurface::new(frame, half_extents)),
            Box::new(PlaneSurface::new(frame)),
        )
    }

    /// Unbounded plane used as both patch and backing.
    pub fn flat_plane(frame: SurfaceFrame) -> Self {
        Self::new(
            Box::new(PlaneSurface::new(frame)),
            Box::new(PlaneSurface::new(frame)),
        )
    }

    /// The lateral-extent surface.
    pub fn patch(&self) -> &dyn Surface {
        self.patch.as_ref()
    }

    /// The depth surface.
    pub fn backing(&self) -> &dyn Surface {
        self.backing.as_ref()
    }

    /// Frame of the backing surface; touch points are tracked in it.
    pub fn transform(&self) -> &SurfaceFrame {
        self.backing.transform()
    }

    /// Moves both surfaces together.
    pub fn set_transform(&mut self, frame: SurfaceFrame) {
        self.patch.set_transform(frame);
        self.backing.set_transform(frame);
    }
}

impl fmt::Debug for SurfacePatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfacePatch")
            .field("patch", &self.patch.name())
            .field("backing", &self.backing.name())
            .finish()
    }
}

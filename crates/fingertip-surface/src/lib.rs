//! # fingertip-surface
//!
//! Surface queries consumed by the poke engine.
//!
//! Every touchable owns a [`SurfacePatch`]: a *patch* surface that bounds
//! the pokeable area laterally and a *backing* surface that defines depth.
//! Both answer two queries:
//! 1. **Closest point**: nearest point and outward normal for a world point
//! 2. **Raycast**: first front-face hit along a ray within a distance
//!
//! Hosts plug in their own geometry by implementing [`Surface`].

pub mod patch;
pub mod plane;
pub mod rect;
pub mod surface;

pub use patch::SurfacePatch;
pub use plane::PlaneSurface;
pub use rect::RectSurface;
pub use surface::{NullSurface, Surface, SurfaceHit};

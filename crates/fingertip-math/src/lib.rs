//! # fingertip-math
//!
//! Geometry and curve primitives for the fingertip poke engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Quat`, `Affine3A`, etc.)
//! - [`Ray`] for swept-probe queries
//! - [`SurfaceFrame`] and the [`SurfaceTransform`] query trait
//! - [`AnimationCurve`] (keyframed cubic Hermite) and the time-driven [`ProgressCurve`]

pub mod curve;
pub mod frame;
pub mod progress;
pub mod ray;
pub mod vector;

pub use curve::{AnimationCurve, Keyframe};
pub use frame::{SurfaceFrame, SurfaceTransform};
pub use progress::ProgressCurve;
pub use ray::Ray;

// Re-export glam types as the canonical math types for fingertip.
pub use glam::{Affine3A, Quat, Vec2, Vec3};

//! Scene contract types.
//!
//! These types define the boundary between scene files (or the benchmark
//! generators) and the interaction engine. They are plain serializable
//! data; [`crate::loader`] turns them into live touchables.

use serde::{Deserialize, Serialize};

use fingertip_interaction::{ProbeConfig, TouchableConfig};
use fingertip_math::{SurfaceFrame, Vec2, Vec3};
use fingertip_surface::SurfacePatch;

/// A complete replayable scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene label used in reports.
    pub name: String,

    /// Probe configuration. Defaults apply when omitted.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Touchables, registered in this order.
    pub touchables: Vec<TouchableSpec>,

    /// Probe origin samples with strictly increasing time.
    pub trajectory: Vec<TrajectorySample>,
}

impl SceneDescription {
    /// Creates an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probe: ProbeConfig::default(),
            touchables: Vec::new(),
            trajectory: Vec::new(),
        }
    }

    /// Time span of the trajectory in seconds.
    pub fn duration(&self) -> f64 {
        match (self.trajectory.first(), self.trajectory.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }
}

/// One touchable in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchableSpec {
    /// Unique label within the scene.
    pub name: String,

    pub shape: ShapeSpec,

    #[serde(default)]
    pub config: TouchableConfig,
}

/// Flat touchable geometry. The normal points away from the pressable face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Unbounded plane.
    Plane { center: [f32; 3], normal: [f32; 3] },

    /// Rectangle on an unbounded backing plane.
    Rect {
        center: [f32; 3],
        normal: [f32; 3],
        half_extents: [f32; 2],
    },
}

impl ShapeSpec {
    pub fn center(&self) -> Vec3 {
        match self {
            ShapeSpec::Plane { center, .. } | ShapeSpec::Rect { center, .. } => Vec3::from(*center),
        }
    }

    pub fn normal(&self) -> Vec3 {
        match self {
            ShapeSpec::Plane { normal, .. } | ShapeSpec::Rect { normal, .. } => Vec3::from(*normal),
        }
    }

    /// Surface frame with local +Z along the normal.
    pub fn frame(&self) -> SurfaceFrame {
        SurfaceFrame::facing(self.center(), self.normal())
    }

    /// Builds the patch/backing pair.
    pub fn to_patch(&self) -> SurfacePatch {
        match self {
            ShapeSpec::Plane { .. } => SurfacePatch::flat_plane(self.frame()),
            ShapeSpec::Rect { half_extents, .. } => {
                SurfacePatch::flat_rect(self.frame(), Vec2::from(*half_extents))
            }
        }
    }

    /// Returns the shape kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeSpec::Plane { .. } => "plane",
            ShapeSpec::Rect { .. } => "rect",
        }
    }
}

/// Probe origin at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Seconds.
    pub time: f64,
    /// World-space probe origin.
    pub origin: [f32; 3],
}

impl TrajectorySample {
    pub fn new(time: f64, origin: Vec3) -> Self {
        Self {
            time,
            origin: origin.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.origin)
    }
}

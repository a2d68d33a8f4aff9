//! Scene validation.
//!
//! Validates a scene before it is built, catching data-level errors early
//! with clear diagnostics.

use std::collections::HashSet;

use fingertip_types::constants::EPSILON;
use fingertip_types::{FingertipError, FingertipResult};

use crate::contract::{SceneDescription, ShapeSpec, TouchableSpec};

/// Validates a complete scene.
///
/// Checks:
/// - Probe and touchable configurations normalize
/// - Touchable names are unique and shapes are well-formed
/// - The trajectory is non-empty, finite and strictly increasing in time
pub fn validate_scene(scene: &SceneDescription) -> FingertipResult<()> {
    scene
        .probe
        .clone()
        .normalized()
        .map_err(|e| FingertipError::InvalidScene(format!("Probe: {e}")))?;

    let mut names = HashSet::new();
    for spec in &scene.touchables {
        if !names.insert(spec.name.as_str()) {
            return Err(FingertipError::InvalidScene(format!(
                "Duplicate touchable name '{}'",
                spec.name
            )));
        }
        validate_touchable(spec)?;
    }

    validate_trajectory(scene)
}

fn validate_touchable(spec: &TouchableSpec) -> FingertipResult<()> {
    let invalid = |msg: String| FingertipError::InvalidScene(format!("Touchable '{}': {msg}", spec.name));

    let (center, normal) = match &spec.shape {
        ShapeSpec::Plane { center, normal } => (center, normal),
        ShapeSpec::Rect {
            center,
            normal,
            half_extents,
        } => {
            if half_extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
                return Err(invalid(format!(
                    "half extents must be positive, got {half_extents:?}"
                )));
            }
            (center, normal)
        }
    };

    if center.iter().chain(normal.iter()).any(|v| !v.is_finite()) {
        return Err(invalid("non-finite center or normal".into()));
    }
    if spec.shape.normal().length() <= EPSILON {
        return Err(invalid("normal must be non-zero".into()));
    }

    spec.config
        .clone()
        .normalized()
        .map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

fn validate_trajectory(scene: &SceneDescription) -> FingertipResult<()> {
    if scene.trajectory.is_empty() {
        return Err(FingertipError::InvalidScene("Trajectory is empty".into()));
    }

    let mut previous: Option<f64> = None;
    for (i, sample) in scene.trajectory.iter().enumerate() {
        if !sample.time.is_finite() || sample.origin.iter().any(|v| !v.is_finite()) {
            return Err(FingertipError::InvalidScene(format!(
                "Trajectory sample {i} is not finite"
            )));
        }
        if let Some(prev) = previous {
            if sample.time <= prev {
                return Err(FingertipError::InvalidScene(format!(
                    "Trajectory time must strictly increase: sample {i} at {} after {prev}",
                    sample.time
                )));
            }
        }
        previous = Some(sample.time);
    }
    Ok(())
}

//! Scene loading and construction.
//!
//! Scenes are read as JSON, or as TOML when the file extension is `.toml`.

use std::fs;
use std::path::Path;

use fingertip_interaction::{ProbeConfig, TouchableSet};
use fingertip_types::{FingertipError, FingertipResult, TouchableId};

use crate::contract::{SceneDescription, TrajectorySample};
use crate::validator::validate_scene;

/// A scene with its touchables registered and ready to replay.
#[derive(Debug)]
pub struct BuiltScene {
    pub name: String,
    pub probe: ProbeConfig,
    pub touchables: TouchableSet,
    /// Touchable names, indexed by [`TouchableId`].
    pub names: Vec<String>,
    pub trajectory: Vec<TrajectorySample>,
}

impl BuiltScene {
    /// Name of a touchable, or `"?"` for an unknown handle.
    pub fn name_of(&self, id: TouchableId) -> &str {
        self.names.get(id.index()).map_or("?", String::as_str)
    }

    /// Handle of the touchable called `name`.
    pub fn find(&self, name: &str) -> Option<TouchableId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| TouchableId(i as u32))
    }
}

impl SceneDescription {
    /// Validates the scene and registers its touchables.
    pub fn build(&self) -> FingertipResult<BuiltScene> {
        validate_scene(self)?;

        let mut touchables = TouchableSet::new();
        let mut names = Vec::with_capacity(self.touchables.len());
        for spec in &self.touchables {
            touchables.register(spec.shape.to_patch(), spec.config.clone())?;
            names.push(spec.name.clone());
        }

        tracing::debug!(
            scene = %self.name,
            touchables = names.len(),
            samples = self.trajectory.len(),
            "scene built"
        );

        Ok(BuiltScene {
            name: self.name.clone(),
            probe: self.probe.clone().normalized()?,
            touchables,
            names,
            trajectory: self.trajectory.clone(),
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Parses and validates a scene from JSON text.
pub fn parse_scene(text: &str) -> FingertipResult<SceneDescription> {
    let scene: SceneDescription =
        serde_json::from_str(text).map_err(|e| FingertipError::Serialization(e.to_string()))?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Parses and validates a scene from TOML text.
pub fn parse_scene_toml(text: &str) -> FingertipResult<SceneDescription> {
    let scene: SceneDescription =
        toml::from_str(text).map_err(|e| FingertipError::Serialization(e.to_string()))?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Reads, parses and validates a scene file.
pub fn load_scene(path: &Path) -> FingertipResult<SceneDescription> {
    let text = fs::read_to_string(path)?;
    let scene = if is_toml(path) {
        parse_scene_toml(&text)?
    } else {
        parse_scene(&text)?
    };
    tracing::info!(path = %path.display(), scene = %scene.name, "loaded scene");
    Ok(scene)
}

/// Writes a scene as pretty-printed JSON (or TOML for `.toml` paths).
pub fn save_scene(path: &Path, scene: &SceneDescription) -> FingertipResult<()> {
    let text = if is_toml(path) {
        toml::to_string_pretty(scene).map_err(|e| FingertipError::Serialization(e.to_string()))?
    } else {
        serde_json::to_string_pretty(scene)
            .map_err(|e| FingertipError::Serialization(e.to_string()))?
    };
    fs::write(path, text)?;
    Ok(())
}

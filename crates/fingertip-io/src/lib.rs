//! # fingertip-io
//!
//! Scene input contract, validation and loading.
//!
//! A scene is everything needed to replay a poke interaction offline:
//! probe configuration, touchable surfaces with their thresholds, and a
//! timestamped probe trajectory. Scenes are JSON (or TOML) on disk.

pub mod contract;
pub mod loader;
pub mod validator;

pub use contract::{SceneDescription, ShapeSpec, TouchableSpec, TrajectorySample};
pub use loader::{load_scene, parse_scene, parse_scene_toml, save_scene, BuiltScene};
pub use validator::validate_scene;

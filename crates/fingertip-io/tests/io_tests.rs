//! Integration tests for fingertip-io.

use fingertip_interaction::{TouchableConfig, TouchableRegistry};
use fingertip_io::contract::{SceneDescription, ShapeSpec, TouchableSpec, TrajectorySample};
use fingertip_io::loader::{load_scene, parse_scene, save_scene};
use fingertip_io::validator::validate_scene;
use fingertip_math::Vec3;
use fingertip_types::{FingertipError, ProbeId};

fn rect(name: &str, z: f32) -> TouchableSpec {
    TouchableSpec {
        name: name.to_string(),
        shape: ShapeSpec::Rect {
            center: [0.0, 0.0, z],
            normal: [0.0, 0.0, 1.0],
            half_extents: [0.02, 0.02],
        },
        config: TouchableConfig::button(),
    }
}

fn make_valid_scene() -> SceneDescription {
    let mut scene = SceneDescription::new("press");
    scene.touchables.push(rect("top", 0.0));
    scene.touchables.push(rect("bottom", -0.01));
    scene.trajectory = (0..10)
        .map(|i| TrajectorySample::new(i as f64 / 72.0, Vec3::new(0.0, 0.0, 0.05 - 0.006 * i as f32)))
        .collect();
    scene
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn scene_round_trip() {
    let scene = make_valid_scene();
    let json = serde_json::to_string(&scene).unwrap();
    let recovered: SceneDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, scene);
}

#[test]
fn shape_json_is_tagged() {
    let json = serde_json::to_string(&rect("a", 0.0).shape).unwrap();
    assert!(json.contains("\"kind\":\"rect\""));
}

#[test]
fn minimal_json_uses_defaults() {
    let text = r#"{
        "name": "minimal",
        "touchables": [
            { "name": "wall", "shape": { "kind": "plane", "center": [0, 0, 0], "normal": [0, 1, 0] } }
        ],
        "trajectory": [ { "time": 0.0, "origin": [0, 0.1, 0] } ]
    }"#;
    let scene = parse_scene(text).unwrap();
    assert_eq!(scene.touchables[0].config, TouchableConfig::default());
    assert!((scene.probe.radius - 0.005).abs() < 1e-9);
    assert_eq!(scene.touchables[0].shape.kind(), "plane");
}

#[test]
fn duration_spans_trajectory() {
    let scene = make_valid_scene();
    assert!((scene.duration() - 9.0 / 72.0).abs() < 1e-12);
    assert_eq!(SceneDescription::new("empty").duration(), 0.0);
}

#[test]
fn shape_frame_faces_normal() {
    let shape = ShapeSpec::Plane {
        center: [1.0, 2.0, 3.0],
        normal: [0.0, 2.0, 0.0],
    };
    let frame = shape.frame();
    assert!((frame.forward() - Vec3::Y).length() < 1e-5);
    assert!((frame.origin() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_scene_passes() {
    assert!(validate_scene(&make_valid_scene()).is_ok());
}

#[test]
fn duplicate_names_rejected() {
    let mut scene = make_valid_scene();
    scene.touchables.push(rect("top", 0.1));
    assert!(matches!(validate_scene(&scene), Err(FingertipError::InvalidScene(_))));
}

#[test]
fn zero_normal_rejected() {
    let mut scene = make_valid_scene();
    scene.touchables[0].shape = ShapeSpec::Plane {
        center: [0.0; 3],
        normal: [0.0; 3],
    };
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn non_positive_extents_rejected() {
    let mut scene = make_valid_scene();
    scene.touchables[1].shape = ShapeSpec::Rect {
        center: [0.0; 3],
        normal: [0.0, 0.0, 1.0],
        half_extents: [0.0, 0.02],
    };
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn time_must_increase() {
    let mut scene = make_valid_scene();
    scene.trajectory[3].time = scene.trajectory[2].time;
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn empty_trajectory_rejected() {
    let mut scene = make_valid_scene();
    scene.trajectory.clear();
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn non_finite_origin_rejected() {
    let mut scene = make_valid_scene();
    scene.trajectory[0].origin[1] = f32::NAN;
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn bad_touchable_config_rejected() {
    let mut scene = make_valid_scene();
    scene.touchables[0].config.cancel_select_normal = -1.0;
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn bad_probe_config_rejected() {
    let mut scene = make_valid_scene();
    scene.probe.radius = f32::NAN;
    assert!(validate_scene(&scene).is_err());
}

// ─── Loader Tests ─────────────────────────────────────────────

#[test]
fn build_registers_in_order() {
    let built = make_valid_scene().build().unwrap();
    assert_eq!(built.touchables.len(), 2);
    let top = built.find("top").unwrap();
    let bottom = built.find("bottom").unwrap();
    assert_eq!(built.touchables.list(ProbeId(0)), &[top, bottom]);
    assert_eq!(built.name_of(bottom), "bottom");
    assert!(built.find("missing").is_none());
}

#[test]
fn malformed_json_is_serialization_error() {
    assert!(matches!(
        parse_scene("{ not json"),
        Err(FingertipError::Serialization(_))
    ));
}

#[test]
fn save_then_load() {
    let dir = std::env::temp_dir().join(format!("fingertip-io-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scene.json");

    let scene = make_valid_scene();
    save_scene(&path, &scene).unwrap();
    let loaded = load_scene(&path).unwrap();
    assert_eq!(loaded, scene);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let result = load_scene(std::path::Path::new("/nonexistent/fingertip/scene.json"));
    assert!(matches!(result, Err(FingertipError::Io(_))));
}

#[test]
fn toml_scene_parses() {
    let text = r#"
name = "toml_scene"

[[touchables]]
name = "button"
shape = { kind = "rect", center = [0.0, 0.0, 0.0], normal = [0.0, 0.0, 1.0], half_extents = [0.02, 0.02] }

[touchables.config]
tiebreaker_score = 4

[[trajectory]]
time = 0.0
origin = [0.0, 0.0, 0.05]

[[trajectory]]
time = 0.1
origin = [0.0, 0.0, 0.0]
"#;
    let scene = fingertip_io::loader::parse_scene_toml(text).unwrap();
    assert_eq!(scene.name, "toml_scene");
    assert_eq!(scene.touchables[0].config.tiebreaker_score, 4);
    assert_eq!(scene.trajectory.len(), 2);
}

//! Benchmark scenarios: procedural touchables and probe paths.
//!
//! Five canonical scenarios for regression testing:
//! 1. **Single press**: press a button and lift off
//! 2. **Recoil double press**: press, pull back partway, press again
//! 3. **Stacked buttons**: pass straight through two parallel buttons
//! 4. **Scroll drag**: press a scroll surface and swipe sideways
//! 5. **Hover jitter**: wobble inside the hover hysteresis band

use serde::{Deserialize, Serialize};

use fingertip_interaction::{RecoilAssistConfig, TouchableConfig};
use fingertip_io::contract::{SceneDescription, ShapeSpec, TouchableSpec, TrajectorySample};
use fingertip_math::Vec3;
use fingertip_types::constants::{DEFAULT_FRAME_DT, DEFAULT_PROBE_RADIUS};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    SinglePress,
    RecoilDoublePress,
    StackedButtons,
    ScrollDrag,
    HoverJitter,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::SinglePress,
            ScenarioKind::RecoilDoublePress,
            ScenarioKind::StackedButtons,
            ScenarioKind::ScrollDrag,
            ScenarioKind::HoverJitter,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::SinglePress => "single_press",
            ScenarioKind::RecoilDoublePress => "recoil_double_press",
            ScenarioKind::StackedButtons => "stacked_buttons",
            ScenarioKind::ScrollDrag => "scroll_drag",
            ScenarioKind::HoverJitter => "hover_jitter",
        }
    }

    /// Looks a kind up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<ScenarioKind> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub scene: SceneDescription,
}

/// Probe-centre height for a press of `depth` into a surface at z = 0.
fn depth(depth: f32) -> f32 {
    DEFAULT_PROBE_RADIUS - depth
}

fn rect(name: &str, z: f32, half_extent: f32, config: TouchableConfig) -> TouchableSpec {
    TouchableSpec {
        name: name.to_string(),
        shape: ShapeSpec::Rect {
            center: [0.0, 0.0, z],
            normal: [0.0, 0.0, 1.0],
            half_extents: [half_extent, half_extent],
        },
        config,
    }
}

fn position_at(keys: &[(f64, Vec3)], t: f64) -> Vec3 {
    for pair in keys.windows(2) {
        let (t0, p0) = pair[0];
        let (t1, p1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            let s = if span > 0.0 { ((t - t0) / span).clamp(0.0, 1.0) } else { 1.0 };
            return p0.lerp(p1, s as f32);
        }
    }
    keys.last().map_or(Vec3::ZERO, |&(_, p)| p)
}

/// Samples a piecewise-linear path at the default frame rate.
fn polyline(keys: &[(f64, Vec3)]) -> Vec<TrajectorySample> {
    let (Some(&(start, _)), Some(&(end, _))) = (keys.first(), keys.last()) else {
        return Vec::new();
    };
    let frames = ((end - start) / DEFAULT_FRAME_DT).ceil().max(0.0) as usize;
    (0..=frames)
        .map(|i| {
            let t = (start + i as f64 * DEFAULT_FRAME_DT).min(end);
            TrajectorySample::new(t, position_at(keys, t))
        })
        .collect()
}

fn vertical(keys: &[(f64, f32)]) -> Vec<TrajectorySample> {
    let keys: Vec<(f64, Vec3)> = keys.iter().map(|&(t, z)| (t, Vec3::new(0.0, 0.0, z))).collect();
    polyline(&keys)
}

impl Scenario {
    /// A 4 cm button pressed 1 cm deep and released.
    pub fn single_press() -> Self {
        let mut scene = SceneDescription::new(ScenarioKind::SinglePress.name());
        scene.touchables.push(rect("button", 0.0, 0.02, TouchableConfig::button()));
        scene.trajectory = vertical(&[(0.0, 0.06), (0.3, depth(0.01)), (0.4, depth(0.01)), (0.7, 0.06)]);
        Self {
            kind: ScenarioKind::SinglePress,
            scene,
        }
    }

    /// A recoil-assisted button pressed, backed off 3 cm and pressed again.
    pub fn recoil_double_press() -> Self {
        let config = TouchableConfig {
            recoil_assist: RecoilAssistConfig {
                enabled: true,
                ..Default::default()
            },
            ..TouchableConfig::button()
        };
        let mut scene = SceneDescription::new(ScenarioKind::RecoilDoublePress.name());
        scene.touchables.push(rect("button", 0.0, 0.02, config));
        scene.trajectory = vertical(&[
            (0.0, 0.06),
            (0.4, depth(0.045)),
            (0.6, depth(0.015)),
            (0.8, depth(0.06)),
            (1.2, 0.06),
        ]);
        Self {
            kind: ScenarioKind::RecoilDoublePress,
            scene,
        }
    }

    /// Two parallel buttons 1 cm apart; only the front one may select.
    pub fn stacked_buttons() -> Self {
        let mut scene = SceneDescription::new(ScenarioKind::StackedButtons.name());
        scene.touchables.push(rect("front", 0.0, 0.02, TouchableConfig::button()));
        scene.touchables.push(rect("back", -0.01, 0.02, TouchableConfig::button()));
        scene.trajectory = vertical(&[(0.0, 0.05), (0.4, -0.02), (0.8, 0.05)]);
        Self {
            kind: ScenarioKind::StackedButtons,
            scene,
        }
    }

    /// A 40 cm scroll surface pressed lightly and swiped 15 cm.
    pub fn scroll_drag() -> Self {
        let mut scene = SceneDescription::new(ScenarioKind::ScrollDrag.name());
        scene.touchables.push(rect("panel", 0.0, 0.2, TouchableConfig::scroll_surface()));
        let press = depth(0.003);
        scene.trajectory = polyline(&[
            (0.0, Vec3::new(0.0, 0.0, 0.04)),
            (0.3, Vec3::new(0.0, 0.0, press)),
            (0.8, Vec3::new(0.15, 0.0, press)),
            (1.0, Vec3::new(0.15, 0.0, 0.04)),
        ]);
        Self {
            kind: ScenarioKind::ScrollDrag,
            scene,
        }
    }

    /// Approach to hover, then wobble between the enter and exit distances.
    pub fn hover_jitter() -> Self {
        let mut scene = SceneDescription::new(ScenarioKind::HoverJitter.name());
        scene.touchables.push(rect("button", 0.0, 0.02, TouchableConfig::button()));

        let mut keys = vec![(0.0, 0.06), (0.3, 0.018)];
        for i in 1..=10 {
            let z = if i % 2 == 1 { 0.024 } else { 0.018 };
            keys.push((0.3 + 0.1 * i as f64, z));
        }
        keys.push((1.6, 0.06));
        scene.trajectory = vertical(&keys);
        Self {
            kind: ScenarioKind::HoverJitter,
            scene,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::SinglePress => Self::single_press(),
            ScenarioKind::RecoilDoublePress => Self::recoil_double_press(),
            ScenarioKind::StackedButtons => Self::stacked_buttons(),
            ScenarioKind::ScrollDrag => Self::scroll_drag(),
            ScenarioKind::HoverJitter => Self::hover_jitter(),
        }
    }
}

//! Integration tests for fingertip-interaction.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use fingertip_interaction::cache::FrameHitCache;
use fingertip_interaction::clock::{Clock, ManualClock};
use fingertip_interaction::config::{
    PositionPinningConfig, ProbeConfig, RecoilAssistConfig, TouchableConfig,
};
use fingertip_interaction::interactor::{FrameReport, InteractorState, PokeInteractor};
use fingertip_interaction::ranking::{compare_within, TiebreakerPolicy};
use fingertip_interaction::registry::{TouchableRegistry, TouchableSet};
use fingertip_interaction::resolver::CandidateResolver;
use fingertip_interaction::touchable::Touchable;
use fingertip_interaction::tracker::{ease_toward, pin_touch_point, TouchSample, TouchTracker};
use fingertip_math::{Ray, SurfaceFrame, Vec2, Vec3};
use fingertip_surface::{PlaneSurface, Surface, SurfaceHit, SurfacePatch};
use fingertip_telemetry::{EventKind, UnselectReason, VecSink};
use fingertip_types::constants::DEFAULT_FRAME_DT;
use fingertip_types::{FingertipError, ProbeId, TouchableId};

// ─── Helpers ──────────────────────────────────────────────────

fn button_at(set: &mut TouchableSet, z: f32, config: TouchableConfig) -> TouchableId {
    let frame = SurfaceFrame::from_translation(Vec3::new(0.0, 0.0, z));
    set.register(SurfacePatch::flat_rect(frame, Vec2::splat(0.05)), config)
        .unwrap()
}

fn scored(score: i32) -> TouchableConfig {
    TouchableConfig {
        tiebreaker_score: score,
        ..Default::default()
    }
}

struct Rig {
    probe: PokeInteractor,
    clock: ManualClock,
    sink: VecSink,
}

impl Rig {
    fn new(radius: f32) -> Self {
        let config = ProbeConfig {
            radius,
            ..Default::default()
        };
        Self {
            probe: PokeInteractor::new(ProbeId(0), config).unwrap(),
            clock: ManualClock::new(0.0),
            sink: VecSink::new(),
        }
    }

    fn step_to(&mut self, set: &TouchableSet, origin: Vec3) -> FrameReport {
        self.clock.advance(DEFAULT_FRAME_DT);
        self.probe.process(origin, set, &self.clock, &mut self.sink)
    }

    fn step(&mut self, set: &TouchableSet, z: f32) -> FrameReport {
        self.step_to(set, Vec3::new(0.0, 0.0, z))
    }

    fn count(&self, name: &str) -> usize {
        self.sink.names().iter().filter(|&&n| n == name).count()
    }
}

/// Probe-centre height giving `depth` of press for a surface at z = 0.
fn z_for_depth(radius: f32, depth: f32) -> f32 {
    radius - depth
}

// ─── Hover Tests ──────────────────────────────────────────────

#[test]
fn hover_uses_enter_and_exit_thresholds() {
    let mut set = TouchableSet::new();
    let id = button_at(
        &mut set,
        0.0,
        TouchableConfig {
            enter_hover_normal: 0.03,
            exit_hover_normal: 0.05,
            ..Default::default()
        },
    );
    let mut rig = Rig::new(0.005);

    assert_eq!(rig.step(&set, 0.10).hovered, None);
    let report = rig.step(&set, 0.02);
    assert_eq!(report.hovered, Some(id));
    assert_eq!(report.state, InteractorState::Hover);
    assert_eq!(rig.step(&set, 0.04).hovered, Some(id), "exit threshold keeps hover");
    let report = rig.step(&set, 0.06);
    assert_eq!(report.hovered, None);
    assert_eq!(report.state, InteractorState::Normal);

    assert_eq!(rig.sink.names(), vec!["hover_enter", "hover_exit"]);
}

#[test]
fn hover_enter_reports_patch_point_and_normal() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.05);
    rig.step(&set, 0.015);

    match &rig.sink.events[0].kind {
        EventKind::HoverEnter { touchable, point, normal } => {
            assert_eq!(*touchable, id);
            assert!(point[2].abs() < 1e-6);
            assert!((normal[2] - 1.0).abs() < 1e-6);
        }
        other => panic!("expected hover enter, got {other:?}"),
    }
}

#[test]
fn min_threshold_blocks_hover_from_below() {
    let mut set = TouchableSet::new();
    let mut config = TouchableConfig::default();
    config.min_thresholds.enabled = true;
    config.min_thresholds.min_normal = 0.01;
    button_at(&mut set, 0.0, config);
    let mut rig = Rig::new(0.005);

    // Starts only 0.008 above the backing: below min_normal.
    rig.step(&set, 0.008);
    assert_eq!(rig.step(&set, 0.008).hovered, None);
}

#[test]
fn hover_ignores_probe_beside_patch() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step_to(&set, Vec3::new(0.2, 0.0, 0.05));
    let report = rig.step_to(&set, Vec3::new(0.2, 0.0, 0.01));
    assert_eq!(report.hovered, None);
}

// ─── Select Tests ─────────────────────────────────────────────

#[test]
fn press_hovers_and_selects_in_one_frame_then_releases() {
    let mut set = TouchableSet::new();
    let id = button_at(
        &mut set,
        0.0,
        TouchableConfig {
            enter_hover_normal: 0.03,
            exit_hover_normal: 0.05,
            ..Default::default()
        },
    );
    let mut rig = Rig::new(0.025);

    rig.step(&set, 0.10);
    let report = rig.step(&set, 0.02);
    assert_eq!(report.state, InteractorState::Select);
    assert_eq!(report.selected, Some(id));
    assert!(report.touch.is_some());
    assert_eq!(rig.sink.names(), vec!["hover_enter", "select"]);

    let report = rig.step(&set, 0.10);
    assert_eq!(report.state, InteractorState::Normal);
    assert_eq!(report.selected, None);
    assert_eq!(
        rig.sink.names(),
        vec!["hover_enter", "select", "unselect", "hover_exit"]
    );
    match &rig.sink.events[2].kind {
        EventKind::Unselect { touchable, reason, .. } => {
            assert_eq!(*touchable, id);
            assert_eq!(*reason, UnselectReason::Released);
        }
        other => panic!("expected unselect, got {other:?}"),
    }
}

#[test]
fn select_reports_contact_on_backing() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step_to(&set, Vec3::new(0.01, 0.0, 0.02));
    rig.step_to(&set, Vec3::new(0.01, 0.0, -0.002));

    let select = rig
        .sink
        .events
        .iter()
        .find(|e| e.kind.name() == "select")
        .expect("select emitted");
    match &select.kind {
        EventKind::Select { point, normal, .. } => {
            assert!((point[0] - 0.01).abs() < 1e-5);
            assert!(point[2].abs() < 1e-5);
            assert!((normal[2] - 1.0).abs() < 1e-6);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn moving_away_never_selects() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    // Starts inside (no motion yet), then moves out.
    rig.step(&set, -0.01);
    rig.step(&set, -0.005);
    rig.step(&set, 0.01);
    assert_eq!(rig.count("select"), 0);
}

#[test]
fn stationary_probe_does_not_select() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    for _ in 0..5 {
        rig.step(&set, 0.003);
    }
    assert_eq!(rig.count("select"), 0);
}

#[test]
fn nearer_surface_wins_regardless_of_order() {
    for reversed in [false, true] {
        let mut set = TouchableSet::new();
        let (front, back) = if reversed {
            let back = button_at(&mut set, -0.01, TouchableConfig::default());
            let front = button_at(&mut set, 0.0, TouchableConfig::default());
            (front, back)
        } else {
            let front = button_at(&mut set, 0.0, TouchableConfig::default());
            let back = button_at(&mut set, -0.01, TouchableConfig::default());
            (front, back)
        };
        let mut rig = Rig::new(0.005);

        rig.step(&set, 0.02);
        let report = rig.step(&set, -0.012);
        assert_eq!(report.selected, Some(front), "reversed = {reversed}");
        assert_ne!(report.selected, Some(back));
        assert_eq!(rig.count("select"), 1);
    }
}

#[test]
fn close_candidates_resolve_by_tiebreaker_score() {
    for _ in 0..100 {
        let mut set = TouchableSet::new();
        let _low = button_at(&mut set, 0.0, scored(1));
        let high = button_at(&mut set, -0.0005, scored(5));
        let mut rig = Rig::new(0.005);

        rig.step(&set, 0.02);
        let report = rig.step(&set, -0.01);
        assert_eq!(report.selected, Some(high));
    }
}

#[test]
fn tiebreaker_score_ignores_registration_order() {
    let mut set = TouchableSet::new();
    let high = button_at(&mut set, -0.0005, scored(5));
    let _low = button_at(&mut set, 0.0, scored(1));
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    assert_eq!(rig.step(&set, -0.01).selected, Some(high));
}

struct PreferLowerScore;

impl TiebreakerPolicy for PreferLowerScore {
    fn compare(&self, a: &Touchable, b: &Touchable) -> Option<Ordering> {
        Some(b.tiebreaker_score().cmp(&a.tiebreaker_score()))
    }
}

#[test]
fn tiebreaker_policy_overrides_scores() {
    let mut set = TouchableSet::new();
    let low = button_at(&mut set, 0.0, scored(1));
    let _high = button_at(&mut set, -0.0005, scored(5));
    let probe = PokeInteractor::new(ProbeId(0), ProbeConfig::default())
        .unwrap()
        .with_tiebreaker(Box::new(PreferLowerScore));
    let mut rig = Rig {
        probe,
        clock: ManualClock::new(0.0),
        sink: VecSink::new(),
    };

    rig.step(&set, 0.02);
    assert_eq!(rig.step(&set, -0.01).selected, Some(low));
}

#[test]
fn press_defers_until_nearby_surface_is_reached() {
    let mut set = TouchableSet::new();
    let _front = button_at(&mut set, 0.0, scored(1));
    let back = button_at(&mut set, -0.0005, scored(5));
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    // Crosses the front surface but stops just short of the back one.
    let report = rig.step(&set, 0.0047);
    assert_eq!(report.selected, None);
    assert_eq!(rig.count("select"), 0);

    let report = rig.step(&set, -0.001);
    assert_eq!(report.selected, Some(back));
}

// ─── Release, Cancel, Removal ─────────────────────────────────

#[test]
fn release_requires_clearing_threshold() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    rig.step(&set, z_for_depth(0.005, 0.005));
    // 0.001 clearance: still inside the release band.
    assert_eq!(rig.step(&set, 0.006).selected, Some(id));
    assert_eq!(rig.step(&set, 0.008).selected, None);
}

#[test]
fn deep_press_cancels_and_locks_out() {
    let mut set = TouchableSet::new();
    let id = button_at(
        &mut set,
        0.0,
        TouchableConfig {
            cancel_select_normal: 0.02,
            ..Default::default()
        },
    );
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.05);
    assert_eq!(rig.step(&set, z_for_depth(0.005, 0.01)).selected, Some(id));
    let report = rig.step(&set, z_for_depth(0.005, 0.03));
    assert_eq!(report.selected, None);
    assert_eq!(rig.count("cancel"), 1);
    assert_eq!(rig.count("unselect"), 0);

    // Still inside: no re-select until the probe lifts off.
    rig.step(&set, z_for_depth(0.005, 0.035));
    rig.step(&set, z_for_depth(0.005, 0.04));
    assert_eq!(rig.count("select"), 1);

    rig.step(&set, 0.05);
    assert_eq!(rig.step(&set, z_for_depth(0.005, 0.01)).selected, Some(id));
    assert_eq!(rig.count("select"), 2);
}

#[test]
fn sliding_off_patch_cancels() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    assert_eq!(rig.step(&set, 0.0).selected, Some(id));
    rig.step_to(&set, Vec3::new(0.04, 0.0, 0.0));
    let report = rig.step_to(&set, Vec3::new(0.09, 0.0, 0.0));
    assert_eq!(report.selected, None);
    assert_eq!(rig.count("cancel"), 1);
}

#[test]
fn unregistered_touchable_ends_selection() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    rig.step(&set, 0.0);
    assert!(set.unregister(id).is_some());
    let report = rig.step(&set, 0.0);

    assert_eq!(report.selected, None);
    assert_eq!(report.hovered, None);
    assert_eq!(
        rig.sink.names(),
        vec!["hover_enter", "select", "unselect", "hover_exit"]
    );
    match &rig.sink.events[2].kind {
        EventKind::Unselect { reason, .. } => assert_eq!(*reason, UnselectReason::Removed),
        other => panic!("unexpected {other:?}"),
    }
}

// ─── Recoil Tests ─────────────────────────────────────────────

fn recoil_config() -> TouchableConfig {
    TouchableConfig {
        recoil_assist: RecoilAssistConfig {
            enabled: true,
            exit_distance: 0.02,
            re_enter_distance: 0.02,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn recoil_unselects_and_gates_reselect() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, recoil_config());
    let mut rig = Rig::new(0.005);
    let r = 0.005;

    rig.step(&set, 0.05);
    assert_eq!(rig.step(&set, z_for_depth(r, 0.01)).selected, Some(id));
    rig.step(&set, z_for_depth(r, 0.03));
    rig.step(&set, z_for_depth(r, 0.05));
    assert_eq!(rig.step(&set, z_for_depth(r, 0.04)).selected, Some(id));

    let report = rig.step(&set, z_for_depth(r, 0.02));
    assert_eq!(report.selected, None);
    assert!(report.recoiled);
    assert_eq!(report.hovered, Some(id), "recoil keeps hover");
    match &rig.sink.events.last().unwrap().kind {
        EventKind::Unselect { reason, .. } => assert_eq!(*reason, UnselectReason::Recoiled),
        other => panic!("unexpected {other:?}"),
    }
    assert!((rig.probe.tracker().re_enter_depth() - 0.04).abs() < 1e-5);

    assert_eq!(rig.step(&set, z_for_depth(r, 0.035)).selected, None);
    assert_eq!(rig.count("select"), 1);

    let report = rig.step(&set, z_for_depth(r, 0.045));
    assert_eq!(report.selected, Some(id));
    assert!(!report.recoiled);
    assert_eq!(rig.count("select"), 2);
}

#[test]
fn recoil_ends_when_probe_lifts_off() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, recoil_config());
    let mut rig = Rig::new(0.005);
    let r = 0.005;

    rig.step(&set, 0.05);
    rig.step(&set, z_for_depth(r, 0.01));
    rig.step(&set, z_for_depth(r, 0.05));
    assert!(rig.step(&set, z_for_depth(r, 0.02)).recoiled);
    let report = rig.step(&set, 0.01);
    assert!(!report.recoiled);
    assert_eq!(report.selected, None);
}

#[test]
fn velocity_expansion_widens_exit() {
    let mut config = recoil_config().recoil_assist;
    config.use_velocity_expansion = true;
    let touchable = TouchableConfig {
        recoil_assist: config,
        ..Default::default()
    };
    let mut tracker = TouchTracker::new();
    tracker.begin(Vec3::ZERO, 0.05, &touchable);

    // Pulling out at 1.4 m/s: full 0.055 expansion.
    let sample = TouchSample {
        local_point: Vec3::ZERO,
        depth: 0.025,
        frame_delta: Vec3::new(0.0, 0.0, 0.014),
        normal: Vec3::Z,
        dt: 0.01,
        now: 0.01,
    };
    assert!(!tracker.should_recoil(&sample, &touchable));
    assert!((tracker.velocity_expansion() - 0.055).abs() < 1e-4);
}

#[test]
fn dynamic_decay_pulls_max_depth_towards_current() {
    let mut config = recoil_config().recoil_assist;
    config.use_dynamic_decay = true;
    let touchable = TouchableConfig {
        recoil_assist: config,
        ..Default::default()
    };
    let mut tracker = TouchTracker::new();
    tracker.begin(Vec3::ZERO, 0.05, &touchable);

    // Sideways motion: ratio 0 → fast decay.
    let sample = TouchSample {
        local_point: Vec3::new(0.01, 0.0, 0.0),
        depth: 0.04,
        frame_delta: Vec3::new(0.01, 0.0, 0.0),
        normal: Vec3::Z,
        dt: 0.01,
        now: 0.01,
    };
    assert!(!tracker.should_recoil(&sample, &touchable));
    assert!(tracker.select_max_depth() < 0.05);
    assert!(tracker.select_max_depth() >= 0.04);
}

#[test]
fn recoiled_touch_point_resyncs_towards_raw_point() {
    let mut config = recoil_config();
    config.drag_thresholds.enabled = false;
    config.position_pinning.enabled = true;
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, config);
    let mut rig = Rig::new(0.005);
    let r = 0.005;

    rig.step(&set, 0.05);
    assert_eq!(rig.step(&set, z_for_depth(r, 0.01)).selected, Some(id));
    rig.step(&set, z_for_depth(r, 0.05));
    let report = rig.step_to(&set, Vec3::new(0.03, 0.0, z_for_depth(r, 0.05)));
    let pinned_x = report.touch.unwrap().point.x;
    assert!(pinned_x < 0.02, "pinning damps the lateral offset, got {pinned_x}");

    let report = rig.step_to(&set, Vec3::new(0.03, 0.0, z_for_depth(r, 0.02)));
    assert!(report.recoiled);
    assert_eq!(report.selected, None);
    let mut last_x = report.touch.expect("touch reported while recoiled").point.x;
    assert!((last_x - pinned_x).abs() < 1e-5);

    for _ in 0..30 {
        let report = rig.step_to(&set, Vec3::new(0.03, 0.0, z_for_depth(r, 0.02)));
        assert!(report.recoiled);
        let x = report.touch.expect("touch reported while recoiled").point.x;
        assert!(x >= last_x - 1e-6, "resync moves towards the raw point");
        last_x = x;
    }
    assert!((last_x - 0.03).abs() < 1e-4, "resync completes, got {last_x}");
}

#[test]
fn touch_cleared_when_recoil_lifts_off() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, recoil_config());
    let mut rig = Rig::new(0.005);
    let r = 0.005;

    rig.step(&set, 0.05);
    rig.step(&set, z_for_depth(r, 0.01));
    rig.step(&set, z_for_depth(r, 0.05));
    assert!(rig.step(&set, z_for_depth(r, 0.02)).touch.is_some());
    let report = rig.step(&set, 0.01);
    assert!(!report.recoiled);
    assert!(report.touch.is_none());
}

#[test]
fn velocity_expansion_ignores_stationary_sphere() {
    let mut config = recoil_config().recoil_assist;
    config.use_velocity_expansion = true;
    config.velocity_expansion_min_speed = 0.0;
    config.velocity_expansion_max_speed = 0.0;
    let touchable = TouchableConfig {
        recoil_assist: config,
        ..Default::default()
    };
    let mut tracker = TouchTracker::new();
    tracker.begin(Vec3::ZERO, 0.05, &touchable);

    let sample = TouchSample {
        local_point: Vec3::ZERO,
        depth: 0.05,
        frame_delta: Vec3::ZERO,
        normal: Vec3::Z,
        dt: 0.01,
        now: 0.01,
    };
    assert!(!tracker.should_recoil(&sample, &touchable));
    assert_eq!(tracker.velocity_expansion(), 0.0);
}

// ─── Tracker Tests ────────────────────────────────────────────

#[test]
fn pinned_offset_never_exceeds_max() {
    let config = PositionPinningConfig {
        enabled: true,
        ..Default::default()
    };
    for raw in [0.01_f32, 0.05, 0.075, 0.2, 1.0] {
        let pinned = pin_touch_point(
            Vec3::ZERO,
            Vec3::new(raw, 0.0, 0.0),
            &config,
            &SurfaceFrame::IDENTITY,
        );
        assert!(pinned.length() <= 0.075 + 1e-6, "raw {raw} pinned {pinned}");
        assert!(pinned.length() <= raw + 1e-6);
    }
    let far = pin_touch_point(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0), &config, &SurfaceFrame::IDENTITY);
    assert!((far.length() - 0.075).abs() < 1e-5);
}

#[test]
fn tracker_pins_large_offsets() {
    let mut config = TouchableConfig::default();
    config.drag_thresholds.enabled = false;
    config.position_pinning.enabled = true;
    let mut tracker = TouchTracker::new();
    tracker.begin(Vec3::ZERO, 0.001, &config);

    let sample = TouchSample {
        local_point: Vec3::new(0.2, 0.0, 0.0),
        depth: 0.001,
        frame_delta: Vec3::new(0.2, 0.0, 0.0),
        normal: Vec3::Z,
        dt: 0.01,
        now: 0.01,
    };
    tracker.track(&sample, &config, &SurfaceFrame::IDENTITY);
    assert!(tracker.pinned().length() <= 0.075 + 1e-6);
    assert!((tracker.touch_point() - tracker.pinned()).length() < 1e-6);
}

#[test]
fn drag_starts_after_lateral_threshold() {
    let config = TouchableConfig::default();
    let mut tracker = TouchTracker::new();
    tracker.begin(Vec3::ZERO, 0.002, &config);

    let step = |x: f32, depth: f32, now: f64| TouchSample {
        local_point: Vec3::new(x, 0.0, 0.0),
        depth,
        frame_delta: Vec3::ZERO,
        normal: Vec3::Z,
        dt: 0.01,
        now,
    };

    tracker.track(&step(0.005, 0.002, 0.01), &config, &SurfaceFrame::IDENTITY);
    assert!(!tracker.is_dragging());
    assert_eq!(tracker.target(), Vec3::ZERO, "held at anchor");

    tracker.track(&step(0.02, 0.002, 0.02), &config, &SurfaceFrame::IDENTITY);
    assert!(tracker.is_dragging());
    assert!((tracker.target().x - 0.02).abs() < 1e-6);

    // Large depth change with little lateral motion stops the drag.
    tracker.track(&step(0.021, 0.02, 0.03), &config, &SurfaceFrame::IDENTITY);
    assert!(!tracker.is_dragging());
}

#[test]
fn drag_easing_converges() {
    let start = Vec3::ZERO;
    let goal = Vec3::new(0.1, 0.0, 0.0);
    let half = ease_toward(start, goal, 0.5, 0.0);
    assert!((half.x - 0.05).abs() < 1e-6);
    let rest = ease_toward(half, goal, 1.0, 0.5);
    assert_eq!(rest, goal);
    assert_eq!(ease_toward(start, goal, 0.3, 1.0), goal);
}

// ─── Moving Surfaces ──────────────────────────────────────────

#[test]
fn previous_origin_follows_surface_motion() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut resolver = CandidateResolver::new(ProbeId(0), ProbeConfig::default());

    resolver.begin_frame(Vec3::new(0.0, 0.0, 0.02));
    resolver.end_frame(&set);
    set.set_transform(id, SurfaceFrame::from_translation(Vec3::new(0.3, 0.0, 0.0)))
        .unwrap();
    resolver.begin_frame(Vec3::new(0.3, 0.0, 0.02));

    let adjusted = resolver.adjusted_previous_origin(set.get(id).unwrap());
    assert!((adjusted - Vec3::new(0.3, 0.0, 0.02)).length() < 1e-6);
}

#[test]
fn probe_riding_with_surface_keeps_hover() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.05);
    rig.step(&set, 0.015);
    for i in 1..=5 {
        let offset = Vec3::new(0.05 * i as f32, 0.0, 0.0);
        set.set_transform(id, SurfaceFrame::from_translation(offset)).unwrap();
        let report = rig.step_to(&set, offset + Vec3::new(0.0, 0.0, 0.015));
        assert_eq!(report.hovered, Some(id));
    }
    assert_eq!(rig.sink.names(), vec!["hover_enter"]);
}

#[test]
fn surface_pushed_into_resting_sphere_selects() {
    let mut set = TouchableSet::new();
    let id = button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.05);
    assert_eq!(rig.step(&set, 0.015).hovered, Some(id));
    set.set_transform(id, SurfaceFrame::from_translation(Vec3::new(0.0, 0.0, 0.012)))
        .unwrap();
    let report = rig.step(&set, 0.015);
    assert_eq!(report.selected, Some(id));
    assert_eq!(rig.sink.names(), vec!["hover_enter", "select"]);
}

#[test]
fn tilted_surface_selects_along_its_normal() {
    let mut set = TouchableSet::new();
    let normal = Vec3::new(1.0, 0.0, 1.0).normalize();
    let frame = SurfaceFrame::facing(Vec3::new(0.5, 0.0, 0.0), normal);
    let id = set
        .register(SurfacePatch::flat_rect(frame, Vec2::splat(0.05)), TouchableConfig::default())
        .unwrap();
    let mut rig = Rig::new(0.005);

    let center = Vec3::new(0.5, 0.0, 0.0);
    rig.step_to(&set, center + normal * 0.02);
    let report = rig.step_to(&set, center - normal * 0.001);
    assert_eq!(report.selected, Some(id));
}

// ─── Enable / Disable ─────────────────────────────────────────

#[test]
fn disable_ends_interaction_and_stays_quiet() {
    let mut set = TouchableSet::new();
    button_at(&mut set, 0.0, TouchableConfig::default());
    let mut rig = Rig::new(0.005);

    rig.step(&set, 0.02);
    rig.step(&set, 0.0);
    rig.probe.disable(&mut rig.sink);
    assert_eq!(rig.probe.state(), InteractorState::Disabled);
    assert_eq!(
        rig.sink.names(),
        vec!["hover_enter", "select", "unselect", "hover_exit"]
    );

    let report = rig.step(&set, 0.01);
    assert_eq!(report.state, InteractorState::Disabled);
    assert_eq!(rig.sink.events.len(), 4);

    rig.probe.enable();
    rig.step(&set, 0.01);
    assert_eq!(rig.probe.state(), InteractorState::Hover);
}

// ─── Cache Tests ──────────────────────────────────────────────

struct CountingPlane {
    inner: PlaneSurface,
    calls: Arc<AtomicUsize>,
}

impl Surface for CountingPlane {
    fn transform(&self) -> &SurfaceFrame {
        self.inner.transform()
    }

    fn set_transform(&mut self, frame: SurfaceFrame) {
        self.inner.set_transform(frame);
    }

    fn closest_point(&self, point: Vec3) -> Option<SurfaceHit> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.inner.closest_point(point)
    }

    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        self.inner.raycast(ray, max_distance)
    }

    fn name(&self) -> &str {
        "counting_plane"
    }
}

#[test]
fn cache_queries_each_surface_once_per_frame() {
    let patch_calls = Arc::new(AtomicUsize::new(0));
    let backing_calls = Arc::new(AtomicUsize::new(0));
    let surface = SurfacePatch::new(
        Box::new(CountingPlane {
            inner: PlaneSurface::new(SurfaceFrame::IDENTITY),
            calls: patch_calls.clone(),
        }),
        Box::new(CountingPlane {
            inner: PlaneSurface::new(SurfaceFrame::IDENTITY),
            calls: backing_calls.clone(),
        }),
    );
    let mut set = TouchableSet::new();
    let id = set.register(surface, TouchableConfig::default()).unwrap();
    let touchable = set.get(id).unwrap();

    let mut cache = FrameHitCache::new();
    cache.begin_frame(Vec3::new(0.1, 0.0, 0.3));
    let first = cache.backing_hit(touchable).unwrap();
    let second = cache.backing_hit(touchable).unwrap();
    assert_eq!(first.point.to_array().map(f32::to_bits), second.point.to_array().map(f32::to_bits));
    assert_eq!(first.distance.to_bits(), second.distance.to_bits());
    cache.patch_hit(touchable);
    cache.patch_hit(touchable);
    assert_eq!(backing_calls.load(AtomicOrdering::SeqCst), 1);
    assert_eq!(patch_calls.load(AtomicOrdering::SeqCst), 1);

    cache.begin_frame(Vec3::new(0.1, 0.0, 0.2));
    let moved = cache.backing_hit(touchable).unwrap();
    assert_eq!(backing_calls.load(AtomicOrdering::SeqCst), 2);
    assert!((moved.distance - 0.2).abs() < 1e-6);
}

// ─── Ranking Tests ────────────────────────────────────────────

#[test]
fn compare_within_treats_band_as_tie() {
    assert_eq!(compare_within(0.010, 0.0105, 0.001), Ordering::Equal);
    assert_eq!(compare_within(0.010, 0.012, 0.001), Ordering::Less);
    assert_eq!(compare_within(0.012, 0.010, 0.001), Ordering::Greater);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn normalize_clamps_exit_below_enter() {
    let config = TouchableConfig {
        enter_hover_normal: 0.03,
        exit_hover_normal: 0.01,
        ..Default::default()
    }
    .normalized()
    .unwrap();
    assert_eq!(config.exit_hover_normal, 0.03);
}

#[test]
fn normalize_rejects_bad_distances() {
    let nan = TouchableConfig {
        enter_hover_normal: f32::NAN,
        ..Default::default()
    };
    assert!(matches!(nan.normalized(), Err(FingertipError::InvalidConfig(_))));

    let negative = ProbeConfig {
        radius: -0.01,
        ..Default::default()
    };
    assert!(negative.normalized().is_err());
    assert!(PokeInteractor::new(ProbeId(0), ProbeConfig { radius: f32::INFINITY, ..Default::default() }).is_err());
}

#[test]
fn normalize_repairs_recoil_and_pinning() {
    let mut config = TouchableConfig::default();
    config.recoil_assist.velocity_expansion_min_speed = 1.0;
    config.recoil_assist.velocity_expansion_max_speed = 0.5;
    config.position_pinning.enabled = true;
    config.position_pinning.max_pin_distance = 0.0;

    let config = config.normalized().unwrap();
    assert_eq!(config.recoil_assist.velocity_expansion_max_speed, 1.0);
    assert!(!config.position_pinning.enabled);
}

#[test]
fn normalize_rejects_zero_velocity_expansion_range() {
    let mut config = TouchableConfig::default();
    config.recoil_assist.use_velocity_expansion = true;
    config.recoil_assist.velocity_expansion_min_speed = 0.0;
    config.recoil_assist.velocity_expansion_max_speed = 0.0;
    assert!(matches!(config.clone().normalized(), Err(FingertipError::InvalidConfig(_))));

    config.recoil_assist.use_velocity_expansion = false;
    assert!(config.normalized().is_ok());
}

#[test]
fn register_rejects_invalid_config() {
    let mut set = TouchableSet::new();
    let result = set.register(
        SurfacePatch::flat_plane(SurfaceFrame::IDENTITY),
        TouchableConfig {
            close_distance_threshold: -1.0,
            ..Default::default()
        },
    );
    assert!(result.is_err());
    assert!(set.is_empty());
}

#[test]
fn presets_differ_in_assists() {
    let button = TouchableConfig::button();
    let scroll = TouchableConfig::scroll_surface();
    assert!(!button.recoil_assist.enabled);
    assert!(scroll.recoil_assist.enabled);
    assert!(scroll.position_pinning.enabled);
    assert!(scroll.normalized().is_ok());
}

#[test]
fn config_serde_round_trip_fills_defaults() {
    let config: TouchableConfig =
        serde_json::from_str(r#"{"enter_hover_normal": 0.025, "tiebreaker_score": 3}"#).unwrap();
    assert_eq!(config.enter_hover_normal, 0.025);
    assert_eq!(config.tiebreaker_score, 3);
    assert_eq!(config.exit_hover_normal, TouchableConfig::default().exit_hover_normal);

    let json = serde_json::to_string(&TouchableConfig::scroll_surface()).unwrap();
    let back: TouchableConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, TouchableConfig::scroll_surface());
}

// ─── Registry & Clock ─────────────────────────────────────────

#[test]
fn registry_lists_in_registration_order() {
    let mut set = TouchableSet::new();
    let a = button_at(&mut set, 0.0, TouchableConfig::default());
    let b = button_at(&mut set, 0.1, TouchableConfig::default());
    let c = button_at(&mut set, 0.2, TouchableConfig::default());
    assert_eq!(set.list(ProbeId(0)), &[a, b, c]);

    set.unregister(b);
    assert_eq!(set.list(ProbeId(3)), &[a, c]);
    assert!(set.get(b).is_none());
    assert!(matches!(
        set.set_transform(b, SurfaceFrame::IDENTITY),
        Err(FingertipError::UnknownTouchable(_))
    ));
}

#[test]
fn manual_clock_advances() {
    let clock = ManualClock::new(1.0);
    clock.advance(0.5);
    assert_eq!(clock.now(), 1.5);
    clock.set(3.0);
    assert_eq!(clock.now(), 3.0);
}

#[test]
fn frame_counter_increments_per_process() {
    let set = TouchableSet::new();
    let mut rig = Rig::new(0.005);
    assert_eq!(rig.step(&set, 0.1).frame, 1);
    assert_eq!(rig.step(&set, 0.1).frame, 2);
}

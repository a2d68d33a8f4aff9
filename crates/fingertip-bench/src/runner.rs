//! Replay runner: drives a probe along a scene trajectory and collects metrics.

use std::time::Instant;

use fingertip_interaction::{FrameReport, ManualClock, PokeInteractor};
use fingertip_io::contract::SceneDescription;
use fingertip_telemetry::{EventSink, NullSink, PokeEvent, VecSink};
use fingertip_types::{FingertipResult, ProbeId};

use crate::metrics::ScenarioMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Everything a replay produced.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub metrics: ScenarioMetrics,
    /// Events in emission order.
    pub events: Vec<PokeEvent>,
    /// One report per trajectory sample.
    pub reports: Vec<FrameReport>,
}

/// Runs scenes and scenarios.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Replays a scene with a single probe on a manual clock.
    ///
    /// Sample times drive the clock, so results do not depend on wall time;
    /// only the timing metrics do.
    pub fn replay(scene: &SceneDescription) -> FingertipResult<ReplayOutcome> {
        Self::replay_into(scene, &mut NullSink)
    }

    /// Like [`replay`](Self::replay), also forwarding each frame's events to `forward`.
    pub fn replay_into(
        scene: &SceneDescription,
        forward: &mut dyn EventSink,
    ) -> FingertipResult<ReplayOutcome> {
        let built = scene.build()?;
        let mut probe = PokeInteractor::new(ProbeId(0), built.probe.clone())?;
        let clock = ManualClock::new(built.trajectory.first().map_or(0.0, |s| s.time));
        let mut sink = VecSink::new();

        let mut metrics = ScenarioMetrics::new(built.name.clone());
        let mut reports = Vec::with_capacity(built.trajectory.len());
        let mut frame_times = Vec::with_capacity(built.trajectory.len());
        let mut forwarded = 0;

        for sample in &built.trajectory {
            clock.set(sample.time);
            let start = Instant::now();
            let report = probe.process(sample.position(), &built.touchables, &clock, &mut sink);
            frame_times.push(start.elapsed().as_secs_f64());
            for event in &sink.events[forwarded..] {
                forward.handle(event);
            }
            forwarded = sink.events.len();
            if report.dragging {
                metrics.drag_frames += 1;
            }
            reports.push(report);
        }

        forward.finalize();
        metrics.set_frame_times(&frame_times);
        metrics.record_all(&sink.events);
        tracing::debug!(
            scene = %built.name,
            frames = metrics.frames,
            selects = metrics.selects,
            "replay finished"
        );

        Ok(ReplayOutcome {
            metrics,
            events: sink.events,
            reports,
        })
    }

    /// Runs a single scenario and returns its metrics.
    pub fn run(scenario: &Scenario) -> FingertipResult<ScenarioMetrics> {
        Ok(Self::replay(&scenario.scene)?.metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> FingertipResult<Vec<ScenarioMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}

//! Scenario metrics: event counts and timing from a replay.

use serde::{Deserialize, Serialize};

use fingertip_telemetry::{EventKind, PokeEvent, UnselectReason};

/// Metrics collected from one replayed scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Scenario or scene name.
    pub scenario: String,
    /// Frames processed.
    pub frames: u32,
    pub hover_enters: u32,
    pub hover_exits: u32,
    pub selects: u32,
    /// Unselects of any reason, recoils included.
    pub unselects: u32,
    /// Unselects caused by recoil assist.
    pub recoils: u32,
    pub cancels: u32,
    /// Frames reported as dragging.
    pub drag_frames: u32,
    /// Total wall-clock time spent in `process` (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    /// Slowest frame (seconds).
    pub max_frame_time: f64,
}

impl ScenarioMetrics {
    /// Creates empty metrics for `scenario`.
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            ..Default::default()
        }
    }

    /// Tallies one event.
    pub fn record(&mut self, event: &PokeEvent) {
        match &event.kind {
            EventKind::HoverEnter { .. } => self.hover_enters += 1,
            EventKind::HoverExit { .. } => self.hover_exits += 1,
            EventKind::Select { .. } => self.selects += 1,
            EventKind::Unselect { reason, .. } => {
                self.unselects += 1;
                if *reason == UnselectReason::Recoiled {
                    self.recoils += 1;
                }
            }
            EventKind::Cancel { .. } => self.cancels += 1,
        }
    }

    /// Tallies a batch of events.
    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a PokeEvent>) {
        for event in events {
            self.record(event);
        }
    }

    /// Fills the timing fields from per-frame wall times.
    pub fn set_frame_times(&mut self, frame_times: &[f64]) {
        self.frames = frame_times.len() as u32;
        self.total_wall_time = frame_times.iter().sum();
        self.avg_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            self.total_wall_time / frame_times.len() as f64
        };
        self.max_frame_time = frame_times.iter().copied().fold(0.0, f64::max);
    }

    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,frames,hover_enters,hover_exits,selects,unselects,recoils,cancels,drag_frames,total_wall_time_s,avg_frame_us,max_frame_us".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{:.6},{:.3},{:.3}",
            self.scenario,
            self.frames,
            self.hover_enters,
            self.hover_exits,
            self.selects,
            self.unselects,
            self.recoils,
            self.cancels,
            self.drag_frames,
            self.total_wall_time,
            self.avg_frame_time * 1.0e6,
            self.max_frame_time * 1.0e6,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[ScenarioMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

//! CLI command implementations.

use std::path::Path;

use fingertip_bench::metrics::ScenarioMetrics;
use fingertip_bench::runner::ScenarioRunner;
use fingertip_bench::scenarios::{Scenario, ScenarioKind};
use fingertip_io::loader::{load_scene, save_scene};
use fingertip_telemetry::{EventBus, EventKind, PokeEvent, TracingSink};

fn scenario_kind(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    ScenarioKind::from_name(name).ok_or_else(|| {
        let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
        format!("Unknown scenario: '{name}'. Available: {}", available.join(", ")).into()
    })
}

fn describe(event: &PokeEvent, name: &str) -> String {
    let (point, extra) = match &event.kind {
        EventKind::HoverEnter { point, .. }
        | EventKind::HoverExit { point, .. }
        | EventKind::Select { point, .. }
        | EventKind::Cancel { point, .. } => (point, String::new()),
        EventKind::Unselect { point, reason, .. } => (point, format!(" ({reason:?})")),
    };
    format!(
        "{:>6}  {:<12} {:<16} [{:+.4}, {:+.4}, {:+.4}]{extra}",
        event.frame,
        event.kind.name(),
        name,
        point[0],
        point[1],
        point[2],
    )
}

/// Replay a scene file.
pub fn replay(path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(Path::new(path))?;
    tracing::debug!(path, json, "replaying scene");
    let built = scene.build()?;
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    let outcome = ScenarioRunner::replay_into(&scene, &mut bus)?;

    if json {
        for event in &outcome.events {
            println!("{}", serde_json::to_string(event)?);
        }
        return Ok(());
    }

    println!("Fingertip Replay");
    println!("════════════════");
    println!();
    println!("Scene:       {}", scene.name);
    println!("Touchables:  {}", scene.touchables.len());
    println!("Frames:      {}", outcome.metrics.frames);
    println!("Duration:    {:.3}s", scene.duration());
    println!();
    println!("{:>6}  {:<12} {:<16} point", "frame", "event", "touchable");
    for event in &outcome.events {
        println!("{}", describe(event, built.name_of(event.kind.touchable())));
    }
    println!();

    let m = &outcome.metrics;
    println!(
        "Selects: {}  Unselects: {} (recoils {})  Cancels: {}  Drag frames: {}",
        m.selects, m.unselects, m.recoils, m.cancels, m.drag_frames
    );
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Fingertip Benchmark Suite");
    println!("═════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_kind(scenario_name)?]
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({} touchables, {} frames)",
            kind.name(),
            scenario.scene.touchables.len(),
            scenario.scene.trajectory.len(),
        );

        let metrics = ScenarioRunner::run(&scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;
        tracing::info!(scenario = kind.name(), frames = metrics.frames, "benchmark scenario done");

        println!("  Selects:       {}", metrics.selects);
        println!("  Recoils:       {}", metrics.recoils);
        println!("  Hover enters:  {}", metrics.hover_enters);
        println!("  Avg frame:     {:.3}µs", metrics.avg_frame_time * 1.0e6);
        println!();

        all_metrics.push(metrics);
    }

    let csv = ScenarioMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a scene file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Fingertip Validator");
    println!("───────────────────");
    println!();

    match load_scene(Path::new(path)) {
        Ok(scene) => println!(
            "✅ Scene '{}' is valid ({} touchables, {} samples).",
            scene.name,
            scene.touchables.len(),
            scene.trajectory.len()
        ),
        Err(e) => {
            println!("❌ Scene validation failed: {e}");
            return Err(e.into());
        }
    }
    Ok(())
}

/// Write a built-in scenario as a scene file.
pub fn export(scenario_name: &str, output_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_kind(scenario_kind(scenario_name)?);
    match output_path {
        Some(path) => {
            save_scene(Path::new(path), &scenario.scene)?;
            eprintln!("Scene written to: {path}");
        }
        None => println!("{}", serde_json::to_string_pretty(&scenario.scene)?),
    }
    Ok(())
}

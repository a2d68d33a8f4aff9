//! # fingertip-bench
//!
//! Procedural poke scenarios for the fingertip engine.
//!
//! Provides 5 canonical scenarios, a deterministic replay runner and
//! per-scenario event metrics with CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::ScenarioMetrics;
pub use runner::{ReplayOutcome, ScenarioRunner};
pub use scenarios::{Scenario, ScenarioKind};

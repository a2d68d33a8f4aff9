//! Pluggable event sinks.
//!
//! Sinks consume events as the interactor raises them
//! (collect for tests, log through `tracing`, forward to a bus, etc.).

use crate::events::PokeEvent;

/// Trait for event consumers.
///
/// Implement this to route poke notifications to UI feedback or haptics.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &PokeEvent);

    /// Called when the host shuts down. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that stores events in a `Vec` for testing and inspection.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Collected events.
    pub events: Vec<PokeEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Event names in arrival order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind.name()).collect()
    }

    /// Removes and returns the collected events.
    pub fn drain(&mut self) -> Vec<PokeEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &PokeEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn handle(&mut self, _event: &PokeEvent) {}

    fn name(&self) -> &str {
        "null_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &PokeEvent) {
        tracing::info!(
            frame = event.frame,
            probe = event.probe.0,
            touchable = event.kind.touchable().0,
            event = ?event.kind,
            "{}",
            event.kind.name()
        );
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

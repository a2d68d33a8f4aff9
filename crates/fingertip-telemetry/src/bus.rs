//! Deferred fan-out of poke events.
//!
//! Events handed to the bus during a frame wait in a queue until the host
//! calls [`EventBus::flush`], then go to every sink in emit order.

use crate::events::PokeEvent;
use crate::sinks::EventSink;

/// Queues events and fans them out to a set of sinks.
#[derive(Default)]
pub struct EventBus {
    queue: Vec<PokeEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    muted: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// A muted bus discards events instead of queueing them.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.muted = !enabled;
    }

    pub fn is_enabled(&self) -> bool {
        !self.muted
    }

    pub fn emit(&mut self, event: PokeEvent) {
        if !self.muted {
            self.queue.push(event);
        }
    }

    /// Events waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Hands every queued event to every sink; returns how many events
    /// were delivered.
    pub fn flush(&mut self) -> usize {
        let delivered = self.queue.len();
        for event in self.queue.drain(..) {
            for sink in self.sinks.iter_mut() {
                sink.handle(&event);
            }
        }
        delivered
    }

    /// Delivers what is left and finalizes the sinks.
    pub fn shutdown(&mut self) {
        self.flush();
        self.sinks.iter_mut().for_each(|sink| sink.finalize());
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl EventSink for EventBus {
    fn handle(&mut self, event: &PokeEvent) {
        self.emit(event.clone());
    }

    fn finalize(&mut self) {
        self.shutdown();
    }

    fn name(&self) -> &str {
        "event_bus"
    }
}

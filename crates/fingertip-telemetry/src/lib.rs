//! # fingertip-telemetry
//!
//! Typed interaction events for the poke engine. The interactor raises
//! hover, select, unselect and cancel notifications into an [`EventSink`];
//! sinks collect them, log them through `tracing`, or fan them out via
//! the [`EventBus`].

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, PokeEvent, UnselectReason};
pub use sinks::{EventSink, NullSink, TracingSink, VecSink};

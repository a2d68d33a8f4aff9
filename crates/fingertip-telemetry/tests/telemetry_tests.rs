//! Integration tests for fingertip-telemetry.

use std::sync::{Arc, Mutex};

use fingertip_telemetry::bus::EventBus;
use fingertip_telemetry::events::{EventKind, PokeEvent, UnselectReason};
use fingertip_telemetry::sinks::{EventSink, NullSink, TracingSink, VecSink};
use fingertip_types::{ProbeId, TouchableId};

fn select(frame: u64) -> PokeEvent {
    PokeEvent::new(
        frame,
        ProbeId(0),
        EventKind::Select {
            touchable: TouchableId(1),
            point: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
    )
}

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(VecSink::new()));

    bus.emit(select(1));
    bus.emit(select(2));

    assert_eq!(bus.flush(), 2);
    assert_eq!(bus.flush(), 0);
}

struct FrameLog(Arc<Mutex<Vec<u64>>>);

impl EventSink for FrameLog {
    fn handle(&mut self, event: &PokeEvent) {
        self.0.lock().unwrap().push(event.frame);
    }

    fn name(&self) -> &str {
        "frame_log"
    }
}

#[test]
fn flush_delivers_queued_events_in_order() {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(FrameLog(Arc::clone(&frames))));

    bus.emit(select(4));
    bus.emit(select(2));
    bus.emit(select(9));
    assert_eq!(bus.pending(), 3);
    assert!(frames.lock().unwrap().is_empty(), "nothing delivered before flush");

    bus.shutdown();
    assert_eq!(bus.pending(), 0);
    assert_eq!(*frames.lock().unwrap(), vec![4, 2, 9]);
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(select(1));
    assert_eq!(bus.flush(), 0);
}

#[test]
fn multiple_sinks() {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(VecSink::new()));
    bus.add_sink(Box::new(TracingSink::new()));
    assert_eq!(bus.sink_count(), 2);
}

#[test]
fn bus_is_a_sink() {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(NullSink));
    let sink: &mut dyn EventSink = &mut bus;
    sink.handle(&select(3));
    assert_eq!(sink.name(), "event_bus");
    assert_eq!(bus.flush(), 1);
}

#[test]
fn vec_sink_records_order() {
    let mut sink = VecSink::new();
    sink.handle(&PokeEvent::new(
        1,
        ProbeId(0),
        EventKind::HoverEnter {
            touchable: TouchableId(0),
            point: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
        },
    ));
    sink.handle(&select(1));
    assert_eq!(sink.names(), vec!["hover_enter", "select"]);
    assert_eq!(sink.drain().len(), 2);
    assert!(sink.events.is_empty());
}

#[test]
fn event_kind_touchable() {
    let kind = EventKind::Cancel {
        touchable: TouchableId(9),
        point: [0.0; 3],
        normal: [0.0, 0.0, 1.0],
    };
    assert_eq!(kind.touchable(), TouchableId(9));
    assert_eq!(kind.name(), "cancel");
}

#[test]
fn event_serialization() {
    let event = PokeEvent::new(
        5,
        ProbeId(2),
        EventKind::Unselect {
            touchable: TouchableId(3),
            point: [0.1, 0.2, 0.3],
            normal: [0.0, 0.0, 1.0],
            reason: UnselectReason::Recoiled,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("Recoiled"));
    let recovered: PokeEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

//! Poke event types.
//!
//! Every event names the probe, the frame it was raised in, the touchable
//! involved, and the touch geometry at that moment. Cancel is a distinct
//! kind, never folded into unselect.

use serde::{Deserialize, Serialize};

use fingertip_types::{ProbeId, TouchableId};

/// An interaction event emitted by a probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokeEvent {
    /// Frame counter of the emitting probe (1-indexed).
    pub frame: u64,
    /// Emitting probe.
    pub probe: ProbeId,
    /// Event payload.
    pub kind: EventKind,
}

/// Why a selection ended without a cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnselectReason {
    /// Probe lifted above the release threshold.
    Released,
    /// Probe pulled back past the recoil exit distance.
    Recoiled,
    /// Touchable left the registry or the probe was disabled.
    Removed,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Probe started hovering a touchable.
    HoverEnter {
        touchable: TouchableId,
        /// Closest point on the patch (world).
        point: [f32; 3],
        /// Backing surface normal.
        normal: [f32; 3],
    },

    /// Probe stopped hovering a touchable.
    HoverExit {
        touchable: TouchableId,
        point: [f32; 3],
        normal: [f32; 3],
    },

    /// Probe pressed a touchable.
    Select {
        touchable: TouchableId,
        /// Touch point on the backing surface (world).
        point: [f32; 3],
        normal: [f32; 3],
    },

    /// Selection ended cleanly.
    Unselect {
        touchable: TouchableId,
        point: [f32; 3],
        normal: [f32; 3],
        reason: UnselectReason,
    },

    /// Selection was aborted: the press went too deep or slid off the patch.
    Cancel {
        touchable: TouchableId,
        point: [f32; 3],
        normal: [f32; 3],
    },
}

impl PokeEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, probe: ProbeId, kind: EventKind) -> Self {
        Self { frame, probe, kind }
    }
}

impl EventKind {
    /// The touchable this event concerns.
    pub fn touchable(&self) -> TouchableId {
        match *self {
            EventKind::HoverEnter { touchable, .. }
            | EventKind::HoverExit { touchable, .. }
            | EventKind::Select { touchable, .. }
            | EventKind::Unselect { touchable, .. }
            | EventKind::Cancel { touchable, .. } => touchable,
        }
    }

    /// Short snake_case label.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::HoverEnter { .. } => "hover_enter",
            EventKind::HoverExit { .. } => "hover_exit",
            EventKind::Select { .. } => "select",
            EventKind::Unselect { .. } => "unselect",
            EventKind::Cancel { .. } => "cancel",
        }
    }
}

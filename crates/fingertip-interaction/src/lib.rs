//! # fingertip-interaction
//!
//! Poke interaction engine: decides, per frame and per probe, which
//! touchable surface a fingertip hovers or presses, and tracks the touch
//! point while pressed.
//!
//! ## Architecture
//!
//! ```text
//! PokeInteractor::process(origin, registry, clock, sink)
//!   ├── select / recoil update   (TouchTracker)
//!   ├── CandidateResolver::compute_candidate
//!   │     ├── FrameHitCache      (closest points, once per frame)
//!   │     └── CandidateRanking   (normal → tangent → policy → score)
//!   └── hover reconciliation, events → EventSink
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod interactor;
pub mod ranking;
pub mod registry;
pub mod resolver;
pub mod touchable;
pub mod tracker;

pub use cache::FrameHitCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    DragThresholdsConfig, MinThresholdsConfig, PositionPinningConfig, ProbeConfig,
    RecoilAssistConfig, TouchableConfig,
};
pub use interactor::{FrameReport, InteractorState, PokeInteractor, TouchPoint};
pub use ranking::{CandidateRanking, RankedCandidate, TiebreakerPolicy};
pub use registry::{TouchableRegistry, TouchableSet};
pub use resolver::{CandidateResolver, SelectHit};
pub use touchable::Touchable;
pub use tracker::{TouchSample, TouchTracker};

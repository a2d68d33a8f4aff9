//! # fingertip-types
//!
//! Shared types, identifiers, error types, and tuning defaults
//! for the fingertip poke-interaction engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other fingertip crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{FingertipError, FingertipResult};
pub use ids::{ProbeId, TouchableId};

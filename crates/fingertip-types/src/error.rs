//! Error types for the fingertip engine.
//!
//! Per-frame resolution never fails; only configuration install,
//! scene validation, and I/O return `FingertipResult<T>`.

use thiserror::Error;

use crate::ids::TouchableId;

/// Unified error type for the fingertip engine.
#[derive(Debug, Error)]
pub enum FingertipError {
    /// Configuration value is invalid (non-finite or negative).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scene description is malformed or inconsistent.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// A touchable handle does not refer to a registered touchable.
    #[error("Unknown touchable: {0:?}")]
    UnknownTouchable(TouchableId),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, FingertipError>`.
pub type FingertipResult<T> = Result<T, FingertipError>;

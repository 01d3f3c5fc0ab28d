//! Error types for webb-layout.
//!
//! Every variant aborts the whole generation run. The first four describe a
//! defect in the hand-authored layout description; the rest guard the numeric
//! ranges of the emitted table and the output itself.

use thiserror::Error;

use crate::adjacency::Side;

/// Result type for webb-layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or emitting a layout.
#[derive(Debug, Error)]
pub enum Error {
    /// A path token does not match `<DIRECTION><count>?`.
    #[error("invalid segment token {token:?}: {reason}")]
    Grammar {
        token: String,
        reason: &'static str,
    },

    /// A token names a direction outside the hex vocabulary.
    #[error("unknown direction {name:?}")]
    UnknownDirection { name: String },

    /// A sub-segment endpoint touches zero or more than two other LEDs.
    #[error(
        "segment {segment} [{begin}, {end}] has {found} {side} neighbors, expected 1 or 2"
    )]
    AdjacencyCount {
        segment: usize,
        begin: usize,
        end: usize,
        side: Side,
        found: usize,
    },

    /// A neighbor was found that is neither the begin nor the end of a sub-segment.
    #[error(
        "LED {index} near the {side} of segment {segment} is not the begin or end of any segment"
    )]
    AdjacencyIdentity {
        segment: usize,
        side: Side,
        index: usize,
    },

    /// No non-zero coordinate to normalize against.
    #[error("layout has no extent to normalize")]
    EmptyLayout,

    /// A fixed-point value does not fit the 16-bit table cells.
    #[error("value {value} does not fit in 16 bits (scale {scale})")]
    ScaleOverflow { value: f64, scale: u16 },

    /// An LED index collides with the end-side flag bit.
    #[error("LED index {index} does not fit below the end flag {limit:#x}")]
    IndexOverflow { index: usize, limit: u16 },

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

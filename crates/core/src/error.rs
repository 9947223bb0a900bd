//! Error types for simviz.

use crate::status::SourceLocation;
use thiserror::Error;

/// Errors produced by host-side simviz operations.
///
/// The per-pixel kernel never produces one of these; everything here is
/// raised either before a dispatch (allocation, sizing) or after it
/// (runtime status checks, thread joins).
#[derive(Debug, Error)]
pub enum VizError {
    /// Width or height was zero (or their product overflowed) when creating a grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two buffers had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A kernel buffer was smaller than the dispatch grid requires.
    #[error("{buffer} buffer too small: need {needed} elements, got {got}")]
    BufferTooSmall {
        buffer: &'static str,
        needed: usize,
        got: usize,
    },

    /// Host memory could not be reserved.
    #[error("host memory allocation of {bytes} bytes failed in {location}")]
    Allocation {
        bytes: usize,
        location: SourceLocation,
    },

    /// A runtime call reported a failure status.
    #[error("{status} in {location}")]
    Status {
        status: String,
        location: SourceLocation,
    },

    /// The requested engine name is not registered.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),

    /// A host thread panicked before it could be joined.
    #[error("host thread '{0}' panicked")]
    ThreadPanicked(String),
}

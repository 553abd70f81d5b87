//! # Arena Error Types
//!
//! All errors that can occur while building or allocating from an arena.

use thiserror::Error;

/// Errors that can occur in the arena.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// Bad initialization input (empty or absent region, absent string, bad alignment).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The aligned request does not fit in the remaining space.
    #[error("arena exhausted: requested {requested} bytes, {available} available")]
    CapacityExhausted {
        /// Bytes requested by the caller, before alignment.
        requested: usize,
        /// Bytes remaining in the arena at the time of the call.
        available: usize,
    },

    /// The formatting engine reported an error.
    #[error("formatting failed")]
    Format,

    /// A typed allocation landed on an address not aligned for its element type.
    #[error("span is not aligned to {align} bytes")]
    Misaligned {
        /// Alignment required by the element type.
        align: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ArenaError {
    /// Returns true if this error means the arena ran out of space.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::CapacityExhausted { .. })
    }
}

/// Result type for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;

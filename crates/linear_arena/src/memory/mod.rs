//! # Memory Management
//!
//! A linear arena over caller-supplied memory, plus string and format helpers
//! built on its allocate operation.
//!
//! ## Design Philosophy
//!
//! The backing region is obtained once by the caller. After that:
//! - No heap allocations
//! - No per-object frees, only a bulk reset
//! - Predictable, O(1) allocation

mod arena;
#[cfg(feature = "format")]
mod format;
mod strings;

pub use arena::Arena;
#[cfg(feature = "format")]
pub use format::{CoreFormat, FormatEngine};

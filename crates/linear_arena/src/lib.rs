//! # Linear Arena
//!
//! Fixed-capacity bump allocator over a borrowed byte region, designed for:
//! - Request-scoped buffers
//! - Parsers and embedded targets
//! - Deterministic, fragmentation-free allocation
//!
//! ## Rules
//!
//! 1. **The caller owns the memory** - the arena only borrows it for its lifetime
//! 2. **No per-allocation free** - everything is reclaimed by [`Arena::reset`]
//! 3. **Failure is a value** - every fallible operation returns [`ArenaResult`]
//!
//! ## Example
//!
//! ```rust
//! use linear_arena::{arena_format, Arena};
//!
//! let mut pool = [0u8; 1024];
//! let mut arena = Arena::new(&mut pool)?;
//!
//! let name = arena.strdup(b"hello")?;
//! let line = arena_format!(arena, "{}:{}", "port", 7777)?;
//! assert_eq!(name.to_bytes(), b"hello");
//! assert_eq!(line.to_bytes(), b"port:7777");
//!
//! arena.reset();
//! assert_eq!(arena.available(), 1024);
//! # Ok::<(), linear_arena::ArenaError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;

pub use config::{ArenaConfig, DEFAULT_ALIGNMENT};
pub use error::{ArenaError, ArenaResult};
pub use memory::Arena;
#[cfg(feature = "format")]
pub use memory::{CoreFormat, FormatEngine};

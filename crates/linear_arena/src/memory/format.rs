//! # Formatted Strings
//!
//! Builds NUL-terminated formatted strings in an arena, in two passes:
//! measure the output, allocate exactly `len + 1` bytes, then render into the
//! span.
//!
//! The formatting facility is injected through [`FormatEngine`]. The default
//! engine, [`CoreFormat`], is `core::fmt`.
//!
//! ```rust
//! use linear_arena::{arena_format, Arena};
//!
//! let mut pool = [0u8; 64];
//! let arena = Arena::new(&mut pool)?;
//!
//! let line = arena_format!(arena, "num={}", 42)?;
//! assert_eq!(line.to_bytes(), b"num=42");
//! # Ok::<(), linear_arena::ArenaError>(())
//! ```

use std::ffi::CStr;
use std::fmt::{self, Write};

use crate::error::{ArenaError, ArenaResult};
use crate::memory::Arena;

/// A two-phase formatting facility.
///
/// `measure` must report exactly the number of bytes `render` writes for the
/// same arguments.
pub trait FormatEngine {
    /// Returns the formatted length in bytes without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the arguments cannot be formatted.
    fn measure(&self, args: fmt::Arguments<'_>) -> Result<usize, fmt::Error>;

    /// Writes the formatted output into `out` and returns the bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if formatting fails or the output does not fit.
    fn render(&self, args: fmt::Arguments<'_>, out: &mut [u8]) -> Result<usize, fmt::Error>;
}

/// The `core::fmt` formatting engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreFormat;

/// Counts bytes without storing them.
struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes into a fixed-capacity byte slice.
struct SliceWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos.checked_add(s.len()).ok_or(fmt::Error)?;
        let dst = self.out.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

impl FormatEngine for CoreFormat {
    fn measure(&self, args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
        let mut counter = Counter(0);
        counter.write_fmt(args)?;
        Ok(counter.0)
    }

    fn render(&self, args: fmt::Arguments<'_>, out: &mut [u8]) -> Result<usize, fmt::Error> {
        let mut writer = SliceWriter { out, pos: 0 };
        writer.write_fmt(args)?;
        Ok(writer.pos)
    }
}

impl Arena<'_> {
    /// Formats `args` into a NUL-terminated string in the arena.
    ///
    /// Use [`arena_format!`](crate::arena_format) at call sites; this is the
    /// form that takes pre-built arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Format`] if formatting fails and
    /// [`ArenaError::CapacityExhausted`] if the string does not fit.
    pub fn format(&self, args: fmt::Arguments<'_>) -> ArenaResult<&CStr> {
        self.format_with(&CoreFormat, args)
    }

    /// Formats `args` with a caller-supplied engine.
    ///
    /// The measuring pass runs first; if it fails nothing is allocated. A
    /// rendering failure leaves the span allocated.
    ///
    /// Output containing a NUL byte is cut at that byte.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Format`] if either pass fails or the passes
    /// disagree on the length, and [`ArenaError::CapacityExhausted`] if the
    /// string does not fit.
    pub fn format_with<E>(&self, engine: &E, args: fmt::Arguments<'_>) -> ArenaResult<&CStr>
    where
        E: FormatEngine + ?Sized,
    {
        let len = engine.measure(args).map_err(|_| {
            tracing::debug!("format length pass failed");
            ArenaError::Format
        })?;
        let total = len.checked_add(1).ok_or_else(|| ArenaError::CapacityExhausted {
            requested: usize::MAX,
            available: self.available(),
        })?;

        let span = self.alloc(total)?;
        let written = engine.render(args, &mut span[..len]).map_err(|_| ArenaError::Format)?;
        if written != len {
            return Err(ArenaError::Format);
        }
        span[len] = 0;

        let span: &[u8] = span;
        CStr::from_bytes_until_nul(span).map_err(|_| ArenaError::Format)
    }
}

/// Formats into a NUL-terminated string in an arena.
///
/// `arena_format!(arena, "fmt", args..)` is `arena.format(format_args!(..))`.
#[macro_export]
macro_rules! arena_format {
    ($arena:expr, $($arg:tt)*) => {
        $arena.format(::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Engine that always fails to measure.
    struct Broken;

    impl FormatEngine for Broken {
        fn measure(&self, _args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
            Err(fmt::Error)
        }

        fn render(&self, _args: fmt::Arguments<'_>, _out: &mut [u8]) -> Result<usize, fmt::Error> {
            Err(fmt::Error)
        }
    }

    /// Engine that upper-cases `core::fmt` output.
    struct Shouting;

    impl FormatEngine for Shouting {
        fn measure(&self, args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
            CoreFormat.measure(args)
        }

        fn render(&self, args: fmt::Arguments<'_>, out: &mut [u8]) -> Result<usize, fmt::Error> {
            let n = CoreFormat.render(args, out)?;
            out[..n].make_ascii_uppercase();
            Ok(n)
        }
    }

    /// Display impl that fails.
    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_measure_matches_render() {
        let mut buf = [0u8; 32];
        let n = CoreFormat.measure(format_args!("{}-{:>4}", "ab", 7)).unwrap();
        let written = CoreFormat.render(format_args!("{}-{:>4}", "ab", 7), &mut buf).unwrap();
        assert_eq!(n, written);
        assert_eq!(&buf[..n], b"ab-   7");
    }

    #[test]
    fn test_render_overflow_fails() {
        let mut buf = [0u8; 3];
        assert!(CoreFormat.render(format_args!("{}", 12345), &mut buf).is_err());
    }

    #[test]
    fn test_arena_format() {
        let mut pool = [0u8; 64];
        let arena = Arena::new(&mut pool).unwrap();

        let s = arena_format!(arena, "num={}", 42).unwrap();
        assert_eq!(s.to_bytes_with_nul(), b"num=42\0");
    }

    #[test]
    fn test_format_by_reference() {
        let mut pool = [0u8; 64];
        let arena = Arena::new(&mut pool).unwrap();
        let by_ref = &arena;

        let s = arena_format!(by_ref, "{}{}", 'x', "y").unwrap();
        assert_eq!(s.to_bytes(), b"xy");
    }

    #[test]
    fn test_format_empty() {
        let mut pool = [0u8; 64];
        let arena = Arena::new(&mut pool).unwrap();
        let s = arena.format(format_args!("")).unwrap();
        assert!(s.to_bytes().is_empty());
    }

    #[test]
    fn test_length_pass_failure_allocates_nothing() {
        let mut pool = [0u8; 64];
        let arena = Arena::new(&mut pool).unwrap();

        assert_eq!(
            arena.format_with(&Broken, format_args!("x")).unwrap_err(),
            ArenaError::Format
        );
        assert_eq!(
            arena_format!(arena, "{}", Failing).unwrap_err(),
            ArenaError::Format
        );
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn test_custom_engine() {
        let mut pool = [0u8; 64];
        let arena = Arena::new(&mut pool).unwrap();
        let s = arena.format_with(&Shouting, format_args!("hi {}", "there")).unwrap();
        assert_eq!(s.to_bytes(), b"HI THERE");
    }

    #[test]
    fn test_format_exhausted() {
        let mut pool = [0u8; 8];
        let arena = Arena::new(&mut pool).unwrap();
        assert!(arena_format!(arena, "{:>32}", 1).unwrap_err().is_exhausted());
        assert_eq!(arena.used(), 0);
    }
}

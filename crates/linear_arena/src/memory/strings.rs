//! # String Helpers
//!
//! NUL-terminated string duplication into an arena.
//!
//! Inputs are byte strings read C-style: the content ends at the first NUL, or
//! at the end of the slice when there is none. Copies live in the arena and do
//! not depend on the source after return.

use std::ffi::CStr;

use crate::error::{ArenaError, ArenaResult};
use crate::memory::Arena;

/// Length of the C string in `bytes`, scanning at most `max_len` bytes.
#[inline]
fn c_len(bytes: &[u8], max_len: usize) -> usize {
    bytes
        .iter()
        .take(max_len)
        .position(|&b| b == 0)
        .unwrap_or_else(|| bytes.len().min(max_len))
}

impl Arena<'_> {
    /// Copies `content` plus a NUL terminator into the arena.
    ///
    /// `content` must not contain a NUL.
    pub(crate) fn copy_terminated(&self, content: &[u8]) -> ArenaResult<&CStr> {
        let len = content.len();
        let span = self.alloc(len + 1)?;
        span[..len].copy_from_slice(content);
        span[len] = 0;

        let span: &[u8] = span;
        CStr::from_bytes_until_nul(span)
            .map_err(|_| ArenaError::InvalidArgument("string is missing its terminator"))
    }

    /// Duplicates a C string into the arena.
    ///
    /// Allocates `len + 1` bytes and copies the content and the terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::CapacityExhausted`] if the copy does not fit.
    pub fn strdup(&self, input: &[u8]) -> ArenaResult<&CStr> {
        let len = c_len(input, usize::MAX);
        self.copy_terminated(&input[..len])
    }

    /// Duplicates an optional C string into the arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidArgument`] if `input` is `None`, otherwise
    /// as [`Arena::strdup`].
    pub fn strdup_opt(&self, input: Option<&[u8]>) -> ArenaResult<&CStr> {
        let input = input.ok_or(ArenaError::InvalidArgument("string is absent"))?;
        self.strdup(input)
    }

    /// Duplicates at most `max_len` bytes of a C string into the arena.
    ///
    /// Stops at the first NUL or after `max_len` bytes, whichever comes
    /// first. The copy is always NUL-terminated; truncation is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::CapacityExhausted`] if the copy does not fit.
    pub fn strndup(&self, input: &[u8], max_len: usize) -> ArenaResult<&CStr> {
        let len = c_len(input, max_len);
        self.copy_terminated(&input[..len])
    }
}

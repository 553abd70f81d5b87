//! # Arena Allocator
//!
//! A bump allocator over a borrowed byte region. Allocations are freed all at
//! once when the arena is reset or dropped.
//!
//! ## Safety Note
//!
//! Handing out several live `&mut [u8]` spans from `&self` needs a raw base
//! pointer. Every span is carved from `[used, used + aligned)` and `used` only
//! grows between resets, so spans are disjoint. `reset` takes `&mut self`, so
//! the borrow checker rejects any span still alive across it.

#![allow(unsafe_code)]

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::config::ArenaConfig;
use crate::error::{ArenaError, ArenaResult};

/// A bump-pointer arena allocator over caller-owned memory.
///
/// Allocations are fast (just bump an offset). The arena never allocates,
/// frees or resizes its region; it only borrows it for `'buf`.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. It can be moved to another thread, but not
/// shared. Use one arena per thread.
///
/// # Example
///
/// ```rust
/// use linear_arena::Arena;
///
/// let mut pool = [0u8; 256];
/// let mut arena = Arena::new(&mut pool)?;
///
/// let header = arena.alloc(16)?;
/// let body = arena.calloc(4, 4)?;
/// header[0] = 0xAB;
/// assert!(body.iter().all(|&b| b == 0));
///
/// // Reset to reclaim everything at once
/// arena.reset();
/// assert_eq!(arena.available(), 256);
/// # Ok::<(), linear_arena::ArenaError>(())
/// ```
pub struct Arena<'buf> {
    /// Start of the backing region.
    base: NonNull<u8>,
    /// Total capacity in bytes.
    capacity: usize,
    /// Current allocation offset.
    used: Cell<usize>,
    /// Size granularity, always a power of two.
    alignment: usize,
    /// Ties the arena to the exclusive borrow of its region.
    _region: PhantomData<&'buf mut [u8]>,
}

// SAFETY: the arena holds the only borrow of its region, so moving it to
// another thread moves all access with it. `Cell` keeps it `!Sync`.
unsafe impl Send for Arena<'_> {}

impl<'buf> Arena<'buf> {
    /// Creates an arena over `region` with the default (pointer-width) alignment.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidArgument`] if `region` is empty.
    pub fn new(region: &'buf mut [u8]) -> ArenaResult<Self> {
        Self::with_config(region, &ArenaConfig::default())
    }

    /// Creates an arena over `region` using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidArgument`] if `region` is empty or the
    /// configured alignment is not a non-zero power of two.
    pub fn with_config(region: &'buf mut [u8], config: &ArenaConfig) -> ArenaResult<Self> {
        if region.is_empty() {
            return Err(ArenaError::InvalidArgument("region must not be empty"));
        }
        config.validate()?;

        let capacity = region.len();
        tracing::debug!(capacity, alignment = config.alignment, "arena initialized");

        Ok(Self {
            base: NonNull::from(region).cast::<u8>(),
            capacity,
            used: Cell::new(0),
            alignment: config.alignment,
            _region: PhantomData,
        })
    }

    /// Creates an arena from an optional region, for callers that carry one.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidArgument`] if `region` is `None` or empty.
    pub fn from_parts(region: Option<&'buf mut [u8]>, config: &ArenaConfig) -> ArenaResult<Self> {
        let region = region.ok_or(ArenaError::InvalidArgument("region is absent"))?;
        Self::with_config(region, config)
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current used space in bytes, padding included.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Returns the remaining free space in bytes.
    #[inline]
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity - self.used.get()
    }

    /// Returns the alignment width every request is rounded up to.
    #[inline]
    #[must_use]
    pub const fn alignment(&self) -> usize {
        self.alignment
    }

    /// Rounds `size` up to the alignment width, or `None` on overflow.
    ///
    /// Zero rounds up to one full width.
    #[inline]
    #[must_use]
    pub const fn aligned_size(&self, size: usize) -> Option<usize> {
        let mask = self.alignment - 1;
        let size = if size == 0 { 1 } else { size };
        match size.checked_add(mask) {
            Some(padded) => Some(padded & !mask),
            None => None,
        }
    }

    /// Reserves `size` bytes (rounded up) and returns the start offset.
    fn bump(&self, size: usize) -> ArenaResult<usize> {
        let offset = self.used.get();
        let end = self
            .aligned_size(size)
            .and_then(|aligned| offset.checked_add(aligned))
            .filter(|&end| end <= self.capacity);

        let Some(end) = end else {
            tracing::debug!(requested = size, available = self.available(), "arena exhausted");
            return Err(ArenaError::CapacityExhausted {
                requested: size,
                available: self.available(),
            });
        };

        self.used.set(end);
        Ok(offset)
    }

    /// Allocates `size` bytes.
    ///
    /// `size` is rounded up to the alignment width and that many bytes are
    /// consumed; the returned span is exactly `size` bytes long. A zero-byte
    /// request still consumes one alignment width.
    ///
    /// The bytes are not initialized by the arena: they hold whatever the
    /// region held before.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::CapacityExhausted`] if the aligned size does not
    /// fit. Nothing is consumed in that case.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> ArenaResult<&mut [u8]> {
        let offset = self.bump(size)?;
        tracing::trace!(offset, size, "arena alloc");

        // SAFETY: `bump` checked `offset + aligned <= capacity` and
        // `size <= aligned`, so the span is inside the region. It starts at
        // the previous `used`, which has moved past it, so no other live span
        // overlaps it. `reset` needs `&mut self`, so none survive a reset.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr().add(offset), size) })
    }

    /// Allocates `count * element_size` bytes and zeroes them.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::CapacityExhausted`] if the product overflows or
    /// the aligned size does not fit.
    #[allow(clippy::mut_from_ref)]
    pub fn calloc(&self, count: usize, element_size: usize) -> ArenaResult<&mut [u8]> {
        let total = count
            .checked_mul(element_size)
            .ok_or_else(|| ArenaError::CapacityExhausted {
                requested: usize::MAX,
                available: self.available(),
            })?;

        let span = self.alloc(total)?;
        span.fill(0);
        Ok(span)
    }

    /// Allocates `count` zeroed elements of `T`.
    ///
    /// The span starts at the current offset, so `T`'s alignment must hold
    /// there; this depends on both the region's address and the arena's
    /// alignment width.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Misaligned`] if the current offset is not aligned
    /// for `T`, [`ArenaError::InvalidArgument`] for zero-sized `T`, and
    /// [`ArenaError::CapacityExhausted`] as [`Arena::calloc`] does. Nothing is
    /// consumed on error.
    #[allow(clippy::mut_from_ref)]
    pub fn calloc_slice<T: bytemuck::Pod>(&self, count: usize) -> ArenaResult<&mut [T]> {
        let element_size = std::mem::size_of::<T>();
        if element_size == 0 {
            return Err(ArenaError::InvalidArgument("zero-sized element type"));
        }

        let align = std::mem::align_of::<T>();
        let next = self.base.as_ptr().wrapping_add(self.used.get());
        if next.align_offset(align) != 0 {
            return Err(ArenaError::Misaligned { align });
        }

        let bytes = self.calloc(count, element_size)?;
        bytemuck::try_cast_slice_mut(bytes).map_err(|_| ArenaError::Misaligned { align })
    }

    /// Resets the arena, reclaiming the whole region.
    ///
    /// This is a **zero-cost** operation: the bytes are not wiped. Spans handed
    /// out earlier borrow the arena, so they cannot be used past this call.
    #[inline]
    pub fn reset(&mut self) {
        tracing::trace!(used = self.used.get(), "arena reset");
        self.used.set(0);
    }
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.used.get())
            .field("alignment", &self.alignment)
            .finish_non_exhaustive()
    }
}

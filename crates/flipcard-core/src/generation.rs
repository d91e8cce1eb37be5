#![forbid(unsafe_code)]

//! Generation stamps for deferred work.
//!
//! Deferred callbacks capture the [`Generation`] that was current when they
//! were scheduled. Bumping the owning [`GenerationCounter`] invalidates every
//! stamp issued before it, so a callback that fires late can detect that it
//! has been superseded and do nothing.
//!
//! # Invariants
//!
//! 1. Generations issued by one counter are strictly increasing.
//! 2. Exactly one generation is current at any time.
//! 3. A stamp that is not current never becomes current again.

/// An opaque, ordered stamp issued by a [`GenerationCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The stamp held by a fresh counter before any bump.
    pub const ZERO: Self = Self(0);

    /// Raw value, for logging.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic generation counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Create a counter at [`Generation::ZERO`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Generation::ZERO,
        }
    }

    /// The currently valid stamp.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    /// Invalidate all outstanding stamps and return the new current one.
    pub fn bump(&mut self) -> Generation {
        self.current = Generation(self.current.0.saturating_add(1));
        self.current
    }

    /// Whether `stamp` is still the current generation.
    #[inline]
    #[must_use]
    pub fn is_current(&self, stamp: Generation) -> bool {
        self.current == stamp
    }
}

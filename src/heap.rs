//! Heap's algorithm on the shared odometer.
//!
//! A rising [`Odometer`] with one digit per element plays the role of Heap's
//! counter array: digit `i` counts how many times position `i` has been
//! swapped in the current pass. Each advance stops at one digit `i` with new
//! value `d`, and the generator performs exactly one transposition:
//!
//! ```text
//! i even   swap(items[0], items[i])
//! i odd    swap(items[d - 1], items[i])
//! ```
//!
//! No window expansion: a run of length `n` visits `n!` arrangements, one per
//! odometer state, each differing from the previous one by a single swap.

use crate::error::{Result, try_zeroed};
use crate::odometer::{Odometer, Order};

/// Single-transposition permutation generator.
#[derive(Clone, Debug)]
pub struct HeapGenerator {
    items: Vec<u8>,
    odometer: Odometer,
}

impl HeapGenerator {
    /// Generator over `0..n`, positioned at the identity.
    ///
    /// # Panics
    /// Panics in debug mode if `n == 0`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        debug_assert!(n > 0, "heap generator needs at least one element");

        Self {
            items: (0..n).map(|v| v as u8).collect(),
            odometer: Odometer::rising(n),
        }
    }

    /// Generator whose buffers are reserved fallibly.
    pub(crate) fn try_new(n: usize) -> Result<Self> {
        let mut generator = Self {
            items: try_zeroed(n, n)?,
            odometer: Odometer::try_new(n, n, Order::Rising)?,
        };

        generator.reset();
        Ok(generator)
    }

    /// Return to the identity and the odometer origin.
    pub fn reset(&mut self) {
        for (i, item) in self.items.iter_mut().enumerate() {
            *item = i as u8;
        }

        self.odometer.reset();
    }

    /// Permutation length.
    #[must_use]
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.items.len()
    }

    /// Current arrangement.
    #[must_use]
    #[inline(always)]
    pub fn current(&self) -> &[u8] {
        &self.items
    }

    /// Whether every arrangement has been produced.
    #[must_use]
    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.odometer.is_done()
    }

    /// The driving odometer.
    #[must_use]
    pub const fn odometer(&self) -> &Odometer {
        &self.odometer
    }

    /// Advance to the next arrangement with one transposition.
    ///
    /// Returns the swapped positions `(low, high)`, or `None` once the
    /// odometer is done.
    #[inline]
    pub fn step(&mut self) -> Option<(usize, usize)> {
        let carry = self.odometer.advance();

        if self.odometer.is_done() {
            return None;
        }

        let i: usize = carry.position;
        let pivot: usize = if i % 2 == 0 { 0 } else { carry.digit - 1 };

        self.items.swap(pivot, i);
        Some((pivot, i))
    }

    /// Visit every remaining arrangement, the current one first.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error. The generator has
    /// already moved past the failed arrangement, so calling again continues
    /// with the next one.
    pub fn try_for_each<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        while !self.is_done() {
            let result: Result<(), E> = visit(&self.items);
            let _ = self.step();
            result?;
        }

        Ok(())
    }
}

//! Filepath: src/swap_base.rs
//!
//! Swap-based base generator for the pure circle strategy.
//!
//! The base is the identity with one swap applied per odometer digit, in
//! digit order:
//!
//! ```text
//! digit i = 0      no swap
//! digit i = d > 0  swap(base[i], base[d - 1])
//! ```
//!
//! This is the inside-out shuffle read as a bijection, so every falling
//! odometer state maps to a distinct base.
//!
//! # Updates
//!
//! An advance whose carry stops at digit `p` with new value `d`:
//! - undoes the swap of every carried digit `j > p`, right to left. A carried
//!   digit held its bound `j`, so the undo is `swap(base[j], base[j - 1])`;
//! - undoes the old swap of digit `p` (value `d - 1`) and applies the new one.
//!
//! Reset digits have value 0 and need no swap. Work is one swap per carried
//! digit plus at most two at the stop, O(1) amortized per base state.

use crate::base::BaseGenerator;
use crate::config::Strategy;
use crate::error::{Result, try_zeroed};
use crate::odometer::Carry;

/// In-place swap sweep over a permutation of `0..len`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapBase {
    items: Vec<u8>,
}

impl SwapBase {
    /// Generator positioned at the identity.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            items: (0..len).map(|v| v as u8).collect(),
        }
    }

    /// Base permutation length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the base is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn reset_identity(&mut self) {
        for (i, item) in self.items.iter_mut().enumerate() {
            *item = i as u8;
        }
    }

    /// Swap applied when digit `i` holds `value`.
    #[inline(always)]
    fn swap_for(&mut self, i: usize, value: usize) {
        if value > 0 {
            self.items.swap(i, value - 1);
        }
    }
}

impl BaseGenerator for SwapBase {
    const STRATEGY: Strategy = Strategy::PureCircle;

    fn allocate(n: usize, len: usize) -> Result<Self> {
        let mut base = Self {
            items: try_zeroed(n, len)?,
        };

        base.reset_identity();
        Ok(base)
    }

    #[inline(always)]
    fn base(&self) -> &[u8] {
        &self.items
    }

    fn rebuild(&mut self, digits: &[usize]) {
        debug_assert_eq!(digits.len(), self.items.len(), "rebuild: digit count mismatch");

        self.reset_identity();

        for (i, &value) in digits.iter().enumerate() {
            self.swap_for(i, value);
        }
    }

    #[inline]
    fn apply(&mut self, carry: Carry, digits: &[usize]) {
        debug_assert_eq!(digits.len(), self.items.len(), "apply: digit count mismatch");

        let p: usize = carry.position;

        for j in (p + 1..self.items.len()).rev() {
            self.items.swap(j, j - 1);
        }

        self.swap_for(p, carry.digit - 1);
        self.swap_for(p, carry.digit);
    }
}

//! Filepath: src/cascade.rs
//!
//! Relocation-based base permutation generator.
//!
//! The generator keeps one grid row per odometer digit. Row `j` stores a
//! circle of the `j + 1` elements `0..=j`, written out twice so any rotation
//! of it is a contiguous slice:
//!
//! ```text
//! row 0:  [0]
//! row 1:  [0 1 0]
//! row 2:  [r r 2 r r]        r r = row 1 rotated by C[1]
//! row j:  [rot(row j-1, C[j-1]) j rot(row j-1, C[j-1])]
//! ```
//!
//! The base permutation is the slice of the last row that starts at the last
//! digit's value. Distinct odometer states give distinct bases, so a full run
//! visits every permutation of `0..len` exactly once.
//!
//! # Updates
//!
//! - Advance without carry: the base slides one slot along its doubled row.
//!   Nothing is copied.
//! - Carry stopping at digit `p`: rows `p + 1 ..= len - 1` are rebuilt, one
//!   block relocation per carried digit, each from the row above it.
//!
//! Row `j` changes only when digit `j - 1` does, once every `len! / j!`
//! advances, so the copying work amortizes to O(1) per base state.

use crate::base::BaseGenerator;
use crate::config::Strategy;
use crate::error::Result;
use crate::grid::FlatGrid;
use crate::odometer::Carry;

/// In-place generator of base permutations driven by an [`Odometer`](crate::Odometer).
#[derive(Clone, Debug)]
pub struct CascadeGenerator {
    grid: FlatGrid<u8>,
    len: usize,
    offset: usize,
}

impl CascadeGenerator {
    /// Generator for permutations of `0..len`, positioned at the identity.
    ///
    /// # Panics
    /// Panics in debug mode if `len == 0`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "cascade needs at least one row");

        Self::at_identity(FlatGrid::new(len, 2 * len - 1), len)
    }

    /// Fallibly allocated generator for a run of length `n` with a base of
    /// `len` elements.
    pub(crate) fn try_new(n: usize, len: usize) -> Result<Self> {
        Ok(Self::at_identity(FlatGrid::try_new(n, len, 2 * len - 1)?, len))
    }

    /// Fill `grid` with the rows of the all-zero odometer state.
    fn at_identity(grid: FlatGrid<u8>, len: usize) -> Self {
        let mut cascade = Self {
            grid,
            len,
            offset: 0,
        };

        cascade.grid.set(0, 0, 0);
        for j in 1..len {
            cascade.build_row(j, 0);
        }

        cascade
    }

    /// Base permutation length.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false: the cascade holds at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current base permutation.
    #[must_use]
    #[inline(always)]
    pub fn base(&self) -> &[u8] {
        &self.grid.row(self.len - 1)[self.offset..self.offset + self.len]
    }

    /// Row `j` of the cascade, including its doubled tail.
    #[must_use]
    pub fn row(&self, j: usize) -> &[u8] {
        &self.grid.row(j)[..2 * j + 1]
    }

    /// Rebuild every row from `digits`. Used to position the generator at an
    /// arbitrary odometer state, e.g. the origin of a partition.
    pub fn rebuild(&mut self, digits: &[usize]) {
        debug_assert_eq!(digits.len(), self.len, "rebuild: digit count mismatch");

        self.grid.set(0, 0, 0);

        for j in 1..self.len {
            self.build_row(j, digits[j - 1]);
        }

        self.offset = digits[self.len - 1];
    }

    /// Follow one odometer advance.
    ///
    /// `digits` is the odometer state after the advance that produced `carry`.
    #[inline]
    pub fn apply(&mut self, carry: Carry, digits: &[usize]) {
        debug_assert_eq!(digits.len(), self.len, "apply: digit count mismatch");

        for j in carry.position + 1..self.len {
            self.build_row(j, digits[j - 1]);
        }

        self.offset = digits[self.len - 1];
    }

    /// Relocate the rotation of row `j - 1` starting at `start` into row `j`,
    /// twice around the new element `j`.
    #[inline(always)]
    fn build_row(&mut self, j: usize, start: usize) {
        debug_assert!(start < j, "build_row: rotation {start} out of range for row {j}");

        let (above, row) = self.grid.split_rows(j - 1, j);
        let rotation: &[u8] = &above[start..start + j];

        row[..j].copy_from_slice(rotation);
        row[j] = j as u8;
        row[j + 1..2 * j + 1].copy_from_slice(rotation);
    }
}

impl BaseGenerator for CascadeGenerator {
    const STRATEGY: Strategy = Strategy::Circle;

    fn allocate(n: usize, len: usize) -> Result<Self> {
        Self::try_new(n, len)
    }

    #[inline(always)]
    fn base(&self) -> &[u8] {
        Self::base(self)
    }

    fn rebuild(&mut self, digits: &[usize]) {
        Self::rebuild(self, digits);
    }

    #[inline(always)]
    fn apply(&mut self, carry: Carry, digits: &[usize]) {
        Self::apply(self, carry, digits);
    }
}

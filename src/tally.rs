//! Count and checksum accumulator.
//!
//! The checksum gives every run a result with genuine data dependence on each
//! permutation it produced, so benchmarks need no anti-optimization tricks.
//! It is order independent, which makes it comparable across strategies and
//! across partitions.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::config::factorial;

/// Weight of one permutation: `sum(j * p[j])`.
#[must_use]
#[inline(always)]
pub fn weigh(perm: &[u8]) -> u64 {
    perm.iter()
        .enumerate()
        .fold(0u64, |acc, (j, &v)| acc + j as u64 * u64::from(v))
}

/// Running count and wrapping checksum of visited permutations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Tally {
    /// Number of permutations recorded.
    pub count: u64,
    /// Wrapping sum of [`weigh`] over every recorded permutation.
    pub checksum: u64,
}

impl Tally {
    /// Empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            checksum: 0,
        }
    }

    /// Record one permutation.
    #[inline(always)]
    pub fn record(&mut self, perm: &[u8]) {
        self.count += 1;
        self.checksum = self.checksum.wrapping_add(weigh(perm));
    }

    /// Tally of a complete enumeration of length `n`, in closed form.
    ///
    /// Every value sits at every position `(n - 1)!` times, so the checksum is
    /// `(n - 1)! * (0 + 1 + .. + (n - 1))^2`, taken modulo `2^64`.
    #[must_use]
    pub const fn expected(n: usize) -> Self {
        let triangle: u64 = (n as u64 * (n as u64).saturating_sub(1)) / 2;
        let rest: u64 = factorial(n.saturating_sub(1));

        Self {
            count: factorial(n),
            checksum: rest.wrapping_mul(triangle.wrapping_mul(triangle)),
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            checksum: self.checksum.wrapping_add(other.checksum),
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}

//! Filepath: src/superperm.rs
//!
//! Superpermutations from the circle order.
//!
//! Consecutive permutations in circle order overlap heavily: within a burst
//! each rotation shares `N - 1` symbols with the one before it. Appending each
//! permutation with its longest suffix/prefix overlap removed produces a
//! sequence containing every permutation as a contiguous window. For
//! `N <= 7` its length is `1! + 2! + .. + N!`.

use crate::config::{Strategy, configure, factorial};
use crate::engine::CircleEngine;
use crate::error::{Error, Result};
use crate::tracing_helpers::debug_log;

/// Largest N accepted by [`superpermutation`]. The result grows as `N!`.
pub const MAX_SUPERPERM_N: usize = 9;

/// Incremental overlap merger.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SuperpermBuilder {
    sequence: Vec<u8>,
    pushed: u64,
}

impl SuperpermBuilder {
    /// Empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sequence: Vec::new(),
            pushed: 0,
        }
    }

    /// Empty builder with room for `capacity` symbols.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sequence: Vec::with_capacity(capacity),
            pushed: 0,
        }
    }

    /// Append `perm`, dropping its longest prefix that is already a suffix of
    /// the sequence.
    pub fn push(&mut self, perm: &[u8]) {
        let overlap: usize = self.overlap(perm);
        self.sequence.extend_from_slice(&perm[overlap..]);
        self.pushed += 1;
    }

    /// Length of the longest suffix of the sequence equal to a prefix of `perm`.
    #[must_use]
    pub fn overlap(&self, perm: &[u8]) -> usize {
        let max: usize = perm.len().min(self.sequence.len());

        (1..=max)
            .rev()
            .find(|&k| self.sequence[self.sequence.len() - k..] == perm[..k])
            .unwrap_or(0)
    }

    /// Number of permutations pushed so far.
    #[must_use]
    pub const fn pushed(&self) -> u64 {
        self.pushed
    }

    /// Sequence built so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.sequence
    }

    /// Consume the builder.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.sequence
    }
}

/// `1! + 2! + .. + n!`.
#[must_use]
pub fn factorial_sum(n: usize) -> u64 {
    (1..=n).map(factorial).sum()
}

/// Build a superpermutation of `0..n` by merging the circle order.
///
/// The sequence comes from the circle engine, whose window needs a base of
/// at least two elements, so `n <= 3` is rejected even though small
/// superpermutations exist (`[0, 1, 2, 0, 1, 0, 2, 1, 0]` for 3).
///
/// # Errors
/// [`Error::InvalidParameter`] unless `4 <= n <= MAX_SUPERPERM_N`.
pub fn superpermutation(n: usize) -> Result<Vec<u8>> {
    let config = configure(n, Strategy::Circle)?;

    if n > MAX_SUPERPERM_N {
        return Err(Error::InvalidParameter {
            n,
            min: crate::config::MIN_CIRCLE_N,
            max: MAX_SUPERPERM_N,
        });
    }

    let capacity: usize = usize::try_from(factorial_sum(n)).unwrap_or(usize::MAX);
    let mut builder = SuperpermBuilder::with_capacity(capacity);

    CircleEngine::new(&config)?.for_each(|p| builder.push(p));

    debug_log!(n, len = builder.as_slice().len(), "superpermutation: built");
    Ok(builder.finish())
}

/// Render symbols as decimal digits. Only meaningful for `n <= 10`.
#[must_use]
pub fn render(sequence: &[u8]) -> String {
    sequence.iter().map(|&s| char::from(b'0' + s)).collect()
}

//! Filepath: src/insertion.rs
//!
//! Full-length insertion sweep.
//!
//! A falling [`Odometer`] with `N - 1` digits selects a prefix arrangement of
//! `0..N-1`, built by inside-out insertion: element `k` goes to slot
//! `digits[k]` and the element it displaces moves to slot `k`. The largest
//! element `N - 1` is then swept across all `N` slots of the prefix, so each
//! prefix yields `N` permutations and a run yields `(N - 1)! * N = N!`.
//!
//! An advance that stops at digit `p` only invalidates the insertions of
//! elements `p..`. Element `p` is taken back out of its old slot (carried
//! digits held their bound, so their own undo is a no-op) and elements
//! `p..N-1` are inserted again for the new digits.

use crate::error::{Result, try_zeroed};
use crate::odometer::{Odometer, Order};

/// Prefix-by-insertion generator with a sweep of the largest element.
#[derive(Clone, Debug)]
pub struct InsertionSweep {
    items: Vec<u8>,
    odometer: Odometer,
    /// First element whose insertion is still pending.
    from: usize,
    /// Next sweep slot of the largest element.
    slot: usize,
}

impl InsertionSweep {
    /// Generator over `0..n`, positioned at the first prefix.
    ///
    /// # Panics
    /// Panics in debug mode if `n < 2`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        debug_assert!(n >= 2, "insertion sweep needs at least two elements");

        Self {
            items: vec![0; n],
            odometer: Odometer::new(n - 1),
            from: 0,
            slot: 0,
        }
    }

    /// Generator whose buffers are reserved fallibly.
    pub(crate) fn try_new(n: usize) -> Result<Self> {
        Ok(Self {
            items: try_zeroed(n, n)?,
            odometer: Odometer::try_new(n, n - 1, Order::Falling)?,
            from: 0,
            slot: 0,
        })
    }

    /// Return to the first prefix.
    pub fn reset(&mut self) {
        self.odometer.reset();
        self.from = 0;
        self.slot = 0;
    }

    /// Permutation length.
    #[must_use]
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.items.len()
    }

    /// Whether every permutation has been produced.
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

    /// Current prefix arrangement of `0..N-1`.
    ///
    /// Valid between sweeps; the prefix is rebuilt lazily at the start of the
    /// next sweep.
    #[must_use]
    pub fn prefix(&mut self) -> &[u8] {
        self.insert_pending();
        let last: usize = self.items.len() - 1;
        &self.items[..last]
    }

    /// Insert every element whose digit changed since the last sweep.
    #[inline]
    fn insert_pending(&mut self) {
        let digits: &[usize] = self.odometer.digits();

        for (k, &c) in digits.iter().enumerate().skip(self.from) {
            self.items[k] = self.items[c];
            self.items[c] = k as u8;
        }

        self.from = digits.len();
    }

    /// Advance to the next prefix, taking back the insertion of the digit
    /// where the carry stopped.
    #[inline]
    fn next_prefix(&mut self) {
        let carry = self.odometer.advance();

        if !self.odometer.is_done() {
            self.items[carry.digit - 1] = self.items[carry.position];
            self.from = carry.position;
        }
    }

    /// Visit every remaining permutation.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error. The sweep has already
    /// moved past the failed permutation, so calling again continues with
    /// the next one.
    pub fn try_for_each<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let last: usize = self.items.len() - 1;

        while !self.is_done() {
            self.insert_pending();

            while self.slot <= last {
                let slot: usize = self.slot;
                self.items[last] = self.items[slot];
                self.items[slot] = last as u8;

                let result: Result<(), E> = visit(&self.items);

                self.items[slot] = self.items[last];
                self.slot += 1;
                result?;
            }

            self.slot = 0;
            self.next_prefix();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::convert::Infallible;

    use super::*;
    use crate::config::factorial;
    use crate::tally::Tally;

    fn collect(n: usize) -> Vec<Vec<u8>> {
        let mut out: Vec<Vec<u8>> = Vec::new();
        InsertionSweep::new(n)
            .try_for_each(|p| -> Result<(), Infallible> {
                out.push(p.to_vec());
                Ok(())
            })
            .unwrap();
        out
    }

    #[test]
    fn test_order_for_four() {
        let all = collect(4);
        assert_eq!(
            &all[..8],
            &[
                vec![3, 0, 1, 2],
                vec![2, 3, 1, 0],
                vec![2, 0, 3, 1],
                vec![2, 0, 1, 3],
                vec![3, 2, 0, 1],
                vec![1, 3, 0, 2],
                vec![1, 2, 3, 0],
                vec![1, 2, 0, 3],
            ]
        );
    }

    #[test]
    fn test_counts_and_uniqueness() {
        for n in 2..=8 {
            let all = collect(n);
            assert_eq!(all.len() as u64, factorial(n), "n = {n}");

            let unique: HashSet<&Vec<u8>> = all.iter().collect();
            assert_eq!(unique.len(), all.len(), "n = {n}");
        }
    }

    #[test]
    fn test_smallest_run() {
        assert_eq!(collect(2), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_tally_matches_closed_form() {
        for n in 2..=7 {
            let mut tally = Tally::new();
            for p in collect(n) {
                tally.record(&p);
            }
            assert_eq!(tally, Tally::expected(n), "n = {n}");
        }
    }

    #[test]
    fn test_prefixes_are_distinct() {
        let mut sweep = InsertionSweep::new(5);
        let mut prefixes: HashSet<Vec<u8>> = HashSet::new();

        while !sweep.is_done() {
            assert!(prefixes.insert(sweep.prefix().to_vec()));
            sweep.next_prefix();
        }

        assert_eq!(prefixes.len(), 24);
    }

    #[test]
    fn test_resume_after_error() {
        for fail_at in [1, 4, 5, 9, 120] {
            let mut sweep = InsertionSweep::try_new(5).unwrap();
            let mut seen: Vec<Vec<u8>> = Vec::new();

            let result = sweep.try_for_each(|p| {
                seen.push(p.to_vec());
                if seen.len() == fail_at { Err(()) } else { Ok(()) }
            });
            assert_eq!(result, Err(()));

            sweep
                .try_for_each(|p| -> Result<(), Infallible> {
                    seen.push(p.to_vec());
                    Ok(())
                })
                .unwrap();

            assert_eq!(seen, collect(5), "fail_at = {fail_at}");
        }
    }

    #[test]
    fn test_reset_replays_same_order() {
        let mut sweep = InsertionSweep::try_new(5).unwrap();
        let _ = sweep.try_for_each(|_| Err::<(), _>(()));
        sweep.reset();

        let mut replay: Vec<Vec<u8>> = Vec::new();
        sweep
            .try_for_each(|p| -> Result<(), Infallible> {
                replay.push(p.to_vec());
                Ok(())
            })
            .unwrap();

        assert_eq!(replay, collect(5));
    }
}

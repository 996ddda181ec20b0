//! Filepath: src/odometer.rs
//!
//! Mixed-radix odometer in the factorial number system.
//!
//! Digit `i` counts in `0..=i`, so an odometer with `len` digits has exactly
//! `len!` states. Two counting orders share that digit layout:
//!
//! - [`Order::Falling`]: the rightmost digit turns fastest. Digit 0 has bound 0
//!   and never takes part in counting: it reaches 1 only when the whole
//!   counter wraps, which is the termination signal.
//! - [`Order::Rising`]: the leftmost digit turns fastest. Digit 0 carries on
//!   every advance, so the first real step lands on digit 1; the counter is
//!   done once the last digit exceeds its bound.
//!
//! [`Odometer::advance`] reports where the carry stopped. The generators
//! depend on that report to perform their single corrective update per
//! carried digit, so this is a side channel and not a plain counter.
//!
//! # Partitions
//!
//! A falling odometer may start with a fixed prefix of digits (`1..floor`).
//! The carry never propagates into the prefix; it stops at `floor - 1` and
//! flags the odometer as done. A partitioned odometer therefore visits
//! `len! / floor!` states.

use crate::error::{Result, try_zeroed};

/// Direction in which carries propagate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Order {
    /// Rightmost digit fastest, carry moves left.
    #[default]
    Falling,

    /// Leftmost digit fastest, carry moves right.
    Rising,
}

/// Where an [`Odometer::advance`] carry stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Carry {
    /// Leftmost digit that changed. Every digit right of it was reset to 0.
    pub position: usize,

    /// New value of the digit at `position`.
    pub digit: usize,
}

impl Carry {
    /// Whether any digit wrapped during a falling advance.
    #[must_use]
    #[inline(always)]
    pub const fn carried(&self, len: usize) -> bool {
        self.position + 1 < len
    }
}

/// Mixed-radix counter with digit `i` bounded by `i`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Odometer {
    digits: Vec<usize>,
    origin: Vec<usize>,
    floor: usize,
    order: Order,
}

impl Odometer {
    /// Zeroed falling odometer with `len` digits.
    ///
    /// # Panics
    /// Panics in debug mode if `len == 0`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::with_order(len, Order::Falling)
    }

    /// Zeroed rising odometer with `len` digits.
    ///
    /// # Panics
    /// Panics in debug mode if `len == 0`.
    #[must_use]
    pub fn rising(len: usize) -> Self {
        Self::with_order(len, Order::Rising)
    }

    fn with_order(len: usize, order: Order) -> Self {
        debug_assert!(len > 0, "odometer needs at least the sentinel digit");

        Self {
            digits: vec![0; len],
            origin: vec![0; len],
            floor: 1,
            order,
        }
    }

    /// Zeroed odometer whose buffers are reserved fallibly.
    pub(crate) fn try_new(n: usize, len: usize, order: Order) -> Result<Self> {
        Ok(Self {
            digits: try_zeroed(n, len)?,
            origin: try_zeroed(n, len)?,
            floor: 1,
            order,
        })
    }

    /// Odometer whose digits `1..=prefix.len()` are fixed to `prefix`.
    ///
    /// # Panics
    /// Panics in debug mode if the prefix leaves no free digit or a prefix
    /// digit exceeds its bound.
    #[must_use]
    pub fn with_prefix(len: usize, prefix: &[usize]) -> Self {
        debug_assert!(prefix.len() < len, "prefix must leave a free digit");

        let mut odometer: Self = Self::new(len);
        odometer.fix_prefix(prefix);
        odometer
    }

    /// Fix digits `1..=prefix.len()` and restart from the new origin.
    pub(crate) fn fix_prefix(&mut self, prefix: &[usize]) {
        debug_assert_eq!(self.order, Order::Falling, "only falling odometers partition");
        debug_assert!(prefix.len() < self.digits.len(), "prefix too long");

        self.origin.fill(0);

        for (k, &value) in prefix.iter().enumerate() {
            debug_assert!(value <= k + 1, "prefix digit {} = {value} exceeds bound", k + 1);
            self.origin[k + 1] = value;
        }

        self.floor = prefix.len() + 1;
        self.reset();
    }

    /// Restore the starting state.
    pub fn reset(&mut self) {
        self.digits.copy_from_slice(&self.origin);
    }

    /// Number of digits.
    #[must_use]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false: an odometer keeps at least its sentinel digit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Counting order.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Index of the leftmost free digit.
    #[must_use]
    pub const fn floor(&self) -> usize {
        self.floor
    }

    /// Current digits.
    #[must_use]
    #[inline(always)]
    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// Digit `i`.
    #[must_use]
    #[inline(always)]
    pub fn digit(&self, i: usize) -> usize {
        self.digits[i]
    }

    /// Whether the carry has left the free digits.
    #[must_use]
    #[inline(always)]
    pub fn is_done(&self) -> bool {
        match self.order {
            Order::Falling => {
                let guard: usize = self.floor - 1;
                self.digits[guard] != self.origin[guard]
            }
            Order::Rising => {
                let last: usize = self.digits.len() - 1;
                self.digits[last] > last
            }
        }
    }

    /// Increment the fastest digit and propagate the carry.
    ///
    /// Propagation stops at the first digit that stays within its bound, or
    /// at the end of the free digits, in which case the odometer is done.
    #[inline]
    pub fn advance(&mut self) -> Carry {
        debug_assert!(!self.is_done(), "advance: odometer already done");

        match self.order {
            Order::Falling => self.advance_falling(),
            Order::Rising => self.advance_rising(),
        }
    }

    #[inline(always)]
    fn advance_rising(&mut self) -> Carry {
        let last: usize = self.digits.len() - 1;
        let mut i: usize = 0;
        self.digits[0] += 1;

        while i < last && self.digits[i] > i {
            self.digits[i] = 0;
            i += 1;
            self.digits[i] += 1;
        }

        Carry {
            position: i,
            digit: self.digits[i],
        }
    }

    #[inline(always)]
    fn advance_falling(&mut self) -> Carry {
        let mut i: usize = self.digits.len() - 1;
        self.digits[i] += 1;

        while i >= self.floor && self.digits[i] > i {
            self.digits[i] = 0;
            i -= 1;
            self.digits[i] += 1;
        }

        Carry {
            position: i,
            digit: self.digits[i],
        }
    }

    /// Mixed-radix value of the free digits: how many advances have been
    /// made since the origin.
    #[must_use]
    pub fn rank(&self) -> u64 {
        let mut rank: u64 = 0;

        match self.order {
            Order::Falling => {
                for i in self.floor..self.digits.len() {
                    rank = rank * (i as u64 + 1) + self.digits[i] as u64;
                }
            }
            Order::Rising => {
                for i in (1..self.digits.len()).rev() {
                    rank = rank * (i as u64 + 1) + self.digits[i] as u64;
                }
            }
        }

        rank
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::factorial;

    #[test]
    fn test_new_is_zeroed() {
        let o = Odometer::new(5);
        assert_eq!(o.digits(), &[0, 0, 0, 0, 0]);
        assert_eq!(o.len(), 5);
        assert!(!o.is_done());
        assert_eq!(o.rank(), 0);
    }

    #[test]
    fn test_advance_without_carry() {
        let mut o = Odometer::new(4);
        let carry = o.advance();

        assert_eq!(carry, Carry { position: 3, digit: 1 });
        assert!(!carry.carried(4));
        assert_eq!(o.digits(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_advance_with_carry() {
        let mut o = Odometer::new(4);

        // Run digit 3 to its bound.
        for _ in 0..3 {
            o.advance();
        }
        assert_eq!(o.digits(), &[0, 0, 0, 3]);

        let carry = o.advance();
        assert_eq!(carry, Carry { position: 2, digit: 1 });
        assert!(carry.carried(4));
        assert_eq!(o.digits(), &[0, 0, 1, 0]);
    }

    #[test]
    fn test_cascading_carry() {
        let mut o = Odometer::new(4);

        // 0,1,2,3 -> last state before the first carry into digit 1.
        for _ in 0..11 {
            o.advance();
        }
        assert_eq!(o.digits(), &[0, 0, 2, 3]);

        let carry = o.advance();
        assert_eq!(carry, Carry { position: 1, digit: 1 });
        assert_eq!(o.digits(), &[0, 1, 0, 0]);
    }

    #[test]
    fn test_done_after_len_factorial_advances() {
        for len in 1..=7 {
            let mut o = Odometer::new(len);
            let mut advances: u64 = 0;

            while !o.is_done() {
                o.advance();
                advances += 1;
            }

            assert_eq!(advances, factorial(len), "len = {len}");
            assert_eq!(o.digit(0), 1, "sentinel signals termination");
        }
    }

    #[test]
    fn test_states_are_distinct() {
        let mut o = Odometer::new(6);
        let mut seen: HashSet<Vec<usize>> = HashSet::new();

        while !o.is_done() {
            assert!(o.digits().iter().enumerate().all(|(i, &d)| d <= i));
            assert!(seen.insert(o.digits().to_vec()), "repeated {:?}", o.digits());
            assert_eq!(o.rank() as usize, seen.len() - 1);
            o.advance();
        }

        assert_eq!(seen.len(), 720);
    }

    #[test]
    fn test_prefix_stays_fixed() {
        let mut o = Odometer::with_prefix(5, &[1, 2]);
        assert_eq!(o.floor(), 3);
        assert_eq!(o.digits(), &[0, 1, 2, 0, 0]);

        let mut states: u64 = 0;
        while !o.is_done() {
            assert_eq!(&o.digits()[1..3], &[1, 2]);
            states += 1;
            o.advance();
        }

        // 4 * 5 combinations of the free digits 3 and 4.
        assert_eq!(states, 20);
    }

    #[test]
    fn test_prefix_covering_every_digit() {
        let mut o = Odometer::with_prefix(3, &[1, 2]);
        assert!(!o.is_done());

        let carry = o.advance();
        assert_eq!(carry.position, 2);
        assert!(o.is_done());
    }

    #[test]
    fn test_reset_restores_origin() {
        let mut o = Odometer::with_prefix(5, &[1]);
        for _ in 0..7 {
            o.advance();
        }
        assert_ne!(o.rank(), 0);

        o.reset();
        assert_eq!(o.digits(), &[0, 1, 0, 0, 0]);
        assert_eq!(o.rank(), 0);
    }

    #[test]
    fn test_rising_turns_leftmost_first() {
        let mut o = Odometer::rising(4);
        assert_eq!(o.order(), Order::Rising);

        assert_eq!(o.advance(), Carry { position: 1, digit: 1 });
        assert_eq!(o.digits(), &[0, 1, 0, 0]);

        assert_eq!(o.advance(), Carry { position: 2, digit: 1 });
        assert_eq!(o.digits(), &[0, 0, 1, 0]);
        assert_eq!(o.rank(), 2);
    }

    #[test]
    fn test_rising_visits_every_state_once() {
        for len in 1..=6 {
            let mut o = Odometer::rising(len);
            let mut seen: HashSet<Vec<usize>> = HashSet::new();

            while !o.is_done() {
                assert!(seen.insert(o.digits().to_vec()), "repeated {:?}", o.digits());
                assert_eq!(o.rank() as usize, seen.len() - 1);
                o.advance();
            }

            assert_eq!(seen.len() as u64, factorial(len), "len = {len}");
        }
    }

    #[test]
    fn test_single_digit() {
        let mut o = Odometer::new(1);
        assert!(!o.is_done());

        let carry = o.advance();
        assert_eq!(carry, Carry { position: 0, digit: 1 });
        assert!(o.is_done());
    }
}

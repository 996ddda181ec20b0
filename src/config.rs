//! Run configuration.
//!
//! [`configure`] validates N for a [`Strategy`] and derives every buffer size
//! the run will need. Sizes are fixed here; engines never reallocate.

use std::fmt as StdFmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tracing_helpers::debug_log;

/// Largest supported length. `20!` is the largest factorial that fits in `u64`.
pub const MAX_N: usize = 20;

/// Smallest length the circle engine accepts. Two tail elements stay fixed
/// outside the rotating base, and the base itself needs at least two slots.
pub const MIN_CIRCLE_N: usize = 4;

/// Smallest length Heap's generator accepts.
pub const MIN_HEAP_N: usize = 1;

/// Smallest length the insertion sweep accepts. Its odometer has `N - 1`
/// digits and needs at least the sentinel.
pub const MIN_INSERTION_N: usize = 2;

/// Generator strategy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Relocation-based cascade with circular window expansion.
    #[default]
    Circle,

    /// Swap-sweep bases with circular window expansion.
    PureCircle,

    /// Heap's algorithm: one transposition per permutation, no window.
    Heap,

    /// Full-length insertion sweep over `(N - 1)!` prefixes, no window.
    Insertion,
}

impl Strategy {
    /// Every strategy, in report order.
    pub const ALL: [Self; 4] = [Self::Circle, Self::PureCircle, Self::Heap, Self::Insertion];

    /// Supported range of N for this strategy.
    #[must_use]
    pub const fn range(self) -> (usize, usize) {
        match self {
            Self::Circle | Self::PureCircle => (MIN_CIRCLE_N, MAX_N),
            Self::Heap => (MIN_HEAP_N, MAX_N),
            Self::Insertion => (MIN_INSERTION_N, MAX_N),
        }
    }

    /// Short name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::PureCircle => "pure_circle",
            Self::Heap => "heap",
            Self::Insertion => "insertion",
        }
    }

    /// Whether the strategy expands bases through the circle window.
    #[must_use]
    pub const fn uses_window(self) -> bool {
        matches!(self, Self::Circle | Self::PureCircle)
    }
}

impl StdFmt::Display for Strategy {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "circle" | "ring" | "cascade" => Ok(Self::Circle),
            "pure" | "pure_circle" | "pp" => Ok(Self::PureCircle),
            "heap" | "transposition" | "swap" => Ok(Self::Heap),
            "insertion" | "permpure" | "full" => Ok(Self::Insertion),
            other => Err(format!(
                "unknown strategy: {other} (expected circle, pure, heap or insertion)"
            )),
        }
    }
}

/// Validated run parameters.
///
/// Constructed only through [`configure`], so an existing `Config` always
/// describes a supported N.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    n: usize,
    strategy: Strategy,
}

impl Config {
    /// Permutation length.
    #[must_use]
    #[inline(always)]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Selected strategy.
    #[must_use]
    #[inline(always)]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Length of the base permutation: `N - 2` behind the window, `N - 1`
    /// for the insertion prefix, `N` for Heap.
    #[must_use]
    pub const fn base_len(&self) -> usize {
        match self.strategy {
            Strategy::Circle | Strategy::PureCircle => self.n - 2,
            Strategy::Heap => self.n,
            Strategy::Insertion => self.n - 1,
        }
    }

    /// Number of odometer digits driving the run.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.base_len()
    }

    /// Window buffer length: primary `N`, mirror-2 `N - 1`, mirror-3 `N - 2`.
    /// Only the window strategies allocate one.
    #[must_use]
    pub const fn window_len(&self) -> usize {
        (3 * self.n).saturating_sub(3)
    }

    /// Cascade grid shape `(rows, cols)`. Row `j` holds a doubled circle of
    /// `j + 1` elements, so the widest row needs `2 * (N - 2) - 1` cells.
    #[must_use]
    pub const fn grid_shape(&self) -> (usize, usize) {
        let rows: usize = self.n.saturating_sub(2);
        (rows, (2 * rows).saturating_sub(1))
    }

    /// Exact number of permutations a full run emits.
    #[must_use]
    pub const fn total(&self) -> u64 {
        factorial(self.n)
    }

    /// Number of base states visited by the odometer.
    #[must_use]
    pub const fn base_states(&self) -> u64 {
        factorial(self.digits())
    }
}

/// `n!` as `u64`. Callers keep `n <= MAX_N`.
#[must_use]
pub const fn factorial(n: usize) -> u64 {
    let mut acc: u64 = 1;
    let mut k: u64 = 2;

    while k <= n as u64 {
        acc *= k;
        k += 1;
    }

    acc
}

/// Validate `n` for `strategy`.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `n` is outside [`Strategy::range`].
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug"))]
pub fn configure(n: usize, strategy: Strategy) -> Result<Config> {
    let (min, max) = strategy.range();

    if !(min..=max).contains(&n) {
        debug_log!(n, %strategy, "configure: rejected");
        return Err(Error::InvalidParameter { n, min, max });
    }

    let config = Config { n, strategy };
    debug_log!(n, %strategy, total = config.total(), "configure: accepted");

    Ok(config)
}

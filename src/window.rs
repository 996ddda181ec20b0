//! Filepath: src/window.rs
//!
//! Circular window expander.
//!
//! One contiguous buffer of `3N - 3` cells holds three named regions:
//!
//! ```text
//! primary   [0, N)        base ++ [N-2, N-1]
//! mirror-2  [N, 2N-1)     copy of primary[0, N-1)
//! mirror-3  [2N-1, 3N-3)  copy of primary[0, N-2)
//! ```
//!
//! Because of the mirrors, every length-N slice that starts at
//! `0..=2N-3` is a fully populated rotation, and no read inside a burst ever
//! wraps around.
//!
//! For each base permutation the expander runs `N - 1` circle steps. Circle
//! step `ci` reads the `N` rotations whose heads are `ci..ci + N`, then moves
//! the element `N - 1` one slot further into mirror-2:
//!
//! ```text
//! w[N - 1 + ci] = w[N + ci]
//! w[N + ci]     = N - 1
//! ```
//!
//! That single relocation turns the circle of step `ci` into the circle of
//! step `ci + 1`, where `N - 1` sits one gap further along the `N - 1` circle
//! `base ++ [N-2]`. The `N - 1` steps place `N - 1` in every gap, and each
//! circle yields its `N` rotations, so one base state produces `N (N - 1)`
//! distinct permutations.
//!
//! A [`Cursor`] names the next rotation to emit. An expansion interrupted by a
//! visitor error reports the cursor just past the failed rotation, so it can
//! be resumed without emitting anything twice.

use crate::error::{Result, try_zeroed};

/// Position inside one base state's expansion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Cursor {
    /// Current circle step.
    pub circle_index: usize,

    /// Head of the next rotation to emit, in `circle_index..circle_index + N`.
    /// Equal to `circle_index + N` once the burst is exhausted.
    pub head: usize,
}

impl Cursor {
    /// First rotation of the first circle step.
    pub const START: Self = Self {
        circle_index: 0,
        head: 0,
    };
}

/// Mirrored window buffer for one circle engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircleWindow {
    cells: Vec<u8>,
    n: usize,
}

impl CircleWindow {
    /// Window for permutations of length `n`.
    ///
    /// # Panics
    /// Panics in debug mode if `n < 3`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        debug_assert!(n >= 3, "window needs two tail elements and a base");

        Self {
            cells: vec![0; 3 * n - 3],
            n,
        }
    }

    /// Window whose buffer is reserved fallibly.
    pub(crate) fn try_new(n: usize) -> Result<Self> {
        debug_assert!(n >= 3, "window needs two tail elements and a base");

        Ok(Self {
            cells: try_zeroed(n, 3 * n - 3)?,
            n,
        })
    }

    /// Permutation length.
    #[must_use]
    #[inline(always)]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Number of circle steps per base state.
    #[must_use]
    #[inline(always)]
    pub const fn circle_steps(&self) -> usize {
        self.n - 1
    }

    /// Permutations produced per base state.
    #[must_use]
    #[inline(always)]
    pub const fn per_base(&self) -> usize {
        self.n * (self.n - 1)
    }

    /// The whole buffer.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Primary region: the base followed by the two tail elements.
    #[must_use]
    pub fn primary(&self) -> &[u8] {
        &self.cells[..self.n]
    }

    /// First mirror region (`N - 1` cells).
    #[must_use]
    pub fn mirror2(&self) -> &[u8] {
        &self.cells[self.n..2 * self.n - 1]
    }

    /// Second mirror region (`N - 2` cells).
    #[must_use]
    pub fn mirror3(&self) -> &[u8] {
        &self.cells[2 * self.n - 1..]
    }

    /// Whether both mirrors replicate the primary region.
    #[must_use]
    pub fn mirrors_synchronized(&self) -> bool {
        let primary: &[u8] = self.primary();
        self.mirror2() == &primary[..self.n - 1] && self.mirror3() == &primary[..self.n - 2]
    }

    /// Mirror step: write `base ++ [N-2, N-1]` into the primary region and
    /// replicate it into both mirrors.
    #[inline]
    pub fn load(&mut self, base: &[u8]) {
        let n: usize = self.n;
        debug_assert_eq!(base.len(), n - 2, "load: base must have N - 2 elements");

        self.cells[..n - 2].copy_from_slice(base);
        self.cells[n - 2] = (n - 2) as u8;
        self.cells[n - 1] = (n - 1) as u8;

        self.cells.copy_within(..n - 1, n);
        self.cells.copy_within(..n - 2, 2 * n - 1);

        debug_assert!(self.mirrors_synchronized());
    }

    /// Rotation whose head sits at `head`.
    #[must_use]
    #[inline(always)]
    pub fn rotation(&self, head: usize) -> &[u8] {
        &self.cells[head..head + self.n]
    }

    /// Hand the `N` rotations of circle step `circle_index` to `visit`.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error.
    #[inline]
    pub fn try_burst<E, F>(&self, circle_index: usize, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        debug_assert!(circle_index < self.n - 1, "try_burst: circle index out of range");

        for head in circle_index..circle_index + self.n {
            visit(self.rotation(head))?;
        }

        Ok(())
    }

    /// Advance from circle step `circle_index` to the next one.
    #[inline(always)]
    pub fn relocate(&mut self, circle_index: usize) {
        let n: usize = self.n;
        debug_assert!(circle_index < n - 1, "relocate: circle index out of range");

        self.cells[n - 1 + circle_index] = self.cells[n + circle_index];
        self.cells[n + circle_index] = (n - 1) as u8;
    }

    /// Run every circle step for the loaded base.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error. The window is then left
    /// mid-expansion; see [`CircleWindow::try_expand_from`] to resume it.
    #[inline]
    pub fn try_expand<E, F>(&mut self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        self.try_expand_from(Cursor::START, visit)
            .map_err(|(_, err)| err)
    }

    /// Run the circle steps from `from` onwards.
    ///
    /// The window must hold the state reached when `from` was reported: the
    /// base loaded and the relocations of the earlier circle steps applied.
    ///
    /// # Errors
    /// Returns the first visitor error together with the cursor of the
    /// rotation after the one that failed.
    #[inline]
    pub fn try_expand_from<E, F>(&mut self, from: Cursor, visit: &mut F) -> Result<(), (Cursor, E)>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let n: usize = self.n;
        let mut first_head: usize = from.head.max(from.circle_index);

        for circle_index in from.circle_index..n - 1 {
            for head in first_head..circle_index + n {
                if let Err(err) = visit(self.rotation(head)) {
                    let next = Cursor {
                        circle_index,
                        head: head + 1,
                    };
                    return Err((next, err));
                }
            }

            self.relocate(circle_index);
            first_head = circle_index + 1;
        }

        Ok(())
    }

    /// Number of rotations still to emit from `from` to the end of the base.
    #[must_use]
    pub const fn remaining(&self, from: Cursor) -> usize {
        let head: usize = if from.head > from.circle_index {
            from.head
        } else {
            from.circle_index
        };

        self.per_base() - from.circle_index * self.n - (head - from.circle_index)
    }

    /// Run every circle step without reading the rotations. Returns the number
    /// of permutations the expansion represents.
    #[inline]
    pub fn skim(&mut self) -> u64 {
        for circle_index in 0..self.n - 1 {
            self.relocate(circle_index);
        }

        self.per_base() as u64
    }
}

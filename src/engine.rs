//! Filepath: src/engine.rs
//!
//! The window engine: odometer, base generator and window driven as one unit.
//!
//! ```text
//! odometer state -> base generator -> window.load (mirror step)
//!     -> N - 1 circle steps of N rotations each -> odometer.advance -> ...
//! ```
//!
//! All buffers are allocated once in [`WindowEngine::new`] and mutated in
//! place for the rest of the run. Two base generators plug in:
//! [`CircleEngine`] uses the relocation cascade, [`PureCircleEngine`] the
//! swap sweep.
//!
//! State is consistent at every base-state boundary, which is where
//! cancellation is checked. A visitor error parks the engine on a [`Cursor`]
//! just past the failed permutation; the next call picks up from there, so an
//! interrupted run still emits each permutation exactly once.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::base::BaseGenerator;
use crate::cascade::CascadeGenerator;
use crate::config::{Config, MIN_CIRCLE_N, configure};
use crate::error::{Error, Result};
use crate::odometer::{Odometer, Order};
use crate::swap_base::SwapBase;
use crate::tally::Tally;
use crate::tracing_helpers::{debug_log, info_log};
use crate::window::{CircleWindow, Cursor};

/// How a cancellable run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Completion {
    /// Every permutation was emitted.
    Finished,

    /// The stop flag was observed at a base-state boundary.
    Stopped {
        /// Permutations emitted before stopping.
        emitted: u64,
    },
}

/// Base generator with circular window expansion.
#[derive(Clone, Debug)]
pub struct WindowEngine<B> {
    odometer: Odometer,
    bases: B,
    window: CircleWindow,
    cursor: Option<Cursor>,
    n: usize,
}

/// Relocation cascade feeding the window.
pub type CircleEngine = WindowEngine<CascadeGenerator>;

/// Swap sweep feeding the window.
pub type PureCircleEngine = WindowEngine<SwapBase>;

impl<B: BaseGenerator> WindowEngine<B> {
    /// Allocate an engine for `config`.
    ///
    /// # Errors
    /// - [`Error::InvalidParameter`] if `config` was validated for a strategy
    ///   that allows an N the window cannot run.
    /// - [`Error::AllocationFailure`] if a buffer cannot be reserved.
    pub fn new(config: &Config) -> Result<Self> {
        let n: usize = config.n();

        if n < MIN_CIRCLE_N {
            let (_, max) = B::STRATEGY.range();
            return Err(Error::InvalidParameter { n, min: MIN_CIRCLE_N, max });
        }

        let len: usize = n - 2;
        let engine = Self {
            odometer: Odometer::try_new(n, len, Order::Falling)?,
            bases: B::allocate(n, len)?,
            window: CircleWindow::try_new(n)?,
            cursor: None,
            n,
        };

        debug_log!(
            n,
            strategy = %B::STRATEGY,
            digits = len,
            window = engine.window.cells().len(),
            "WindowEngine: allocated"
        );

        Ok(engine)
    }

    /// Validate `n` and allocate an engine for it.
    ///
    /// # Errors
    /// See [`configure`] and [`WindowEngine::new`].
    pub fn with_n(n: usize) -> Result<Self> {
        Self::new(&configure(n, B::STRATEGY)?)
    }

    /// Restrict the engine to the base states whose odometer digits
    /// `1..=prefix.len()` equal `prefix`, and rewind to the first of them.
    ///
    /// # Panics
    /// Panics in debug mode if the prefix is longer than `N - 3` or a digit
    /// exceeds its bound.
    pub fn restrict(&mut self, prefix: &[usize]) {
        self.odometer.fix_prefix(prefix);
        self.bases.rebuild(self.odometer.digits());
        self.cursor = None;
    }

    /// Rewind to the first base state.
    pub fn reset(&mut self) {
        self.odometer.reset();
        self.bases.rebuild(self.odometer.digits());
        self.cursor = None;
    }

    /// Permutation length.
    #[must_use]
    #[inline(always)]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Whether every base state has been expanded.
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

    /// Current base permutation of `0..N-2`.
    #[must_use]
    pub fn base(&self) -> &[u8] {
        self.bases.base()
    }

    /// The window buffer.
    #[must_use]
    pub const fn window(&self) -> &CircleWindow {
        &self.window
    }

    /// Where an interrupted expansion will resume, if one is pending.
    #[must_use]
    pub const fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Advance the odometer and let the base generator follow it.
    #[inline]
    fn next_base(&mut self) {
        let carry = self.odometer.advance();

        if !self.odometer.is_done() {
            self.bases.apply(carry, self.odometer.digits());
        }
    }

    /// Mirror step for the current base.
    #[inline]
    fn sync(&mut self) {
        self.window.load(self.bases.base());
    }

    /// Expand the rest of the current base state, then move to the next
    /// base state.
    ///
    /// A fresh base is loaded into the window first. A base left pending by
    /// an earlier visitor error continues from its cursor.
    ///
    /// # Errors
    /// Returns the first visitor error without advancing. The failed
    /// permutation counts as delivered.
    #[inline]
    pub fn try_cycle<E, F>(&mut self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        debug_assert!(!self.is_done(), "try_cycle: engine already done");

        let from: Cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => {
                self.sync();
                Cursor::START
            }
        };

        if let Err((next, err)) = self.window.try_expand_from(from, visit) {
            self.cursor = Some(next);
            return Err(err);
        }

        self.next_base();
        Ok(())
    }

    /// Visit every remaining permutation.
    ///
    /// Each view is valid only for the duration of the call.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error. Calling again resumes
    /// after the permutation that failed.
    pub fn try_for_each<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        while !self.is_done() {
            self.try_cycle(&mut visit)?;
        }

        Ok(())
    }

    /// Visit every remaining permutation with an infallible visitor.
    pub fn for_each<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[u8]),
    {
        let result: Result<(), Infallible> = self.try_for_each(|p| {
            visit(p);
            Ok(())
        });

        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Visit every remaining base permutation without window expansion.
    ///
    /// A pending expansion is dropped; its base is visited again.
    pub fn for_each_base<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[u8]),
    {
        self.cursor = None;

        while !self.is_done() {
            visit(self.bases.base());
            self.next_base();
        }
    }

    /// Visit permutations until done or until `stop` is set.
    ///
    /// The flag is read between base states only, so a stopped engine can be
    /// resumed by calling this again.
    pub fn for_each_until<F>(&mut self, stop: &AtomicBool, mut visit: F) -> Completion
    where
        F: FnMut(&[u8]),
    {
        let mut emitted: u64 = 0;

        while !self.is_done() {
            if stop.load(Ordering::Relaxed) {
                info_log!(n = self.n, emitted, "WindowEngine: stopped");
                return Completion::Stopped { emitted };
            }

            let step: usize = self
                .cursor
                .map_or(self.window.per_base(), |cursor| self.window.remaining(cursor));

            let result: Result<(), Infallible> = self.try_cycle(&mut |p: &[u8]| {
                visit(p);
                Ok(())
            });

            match result {
                Ok(()) => emitted += step as u64,
                Err(never) => match never {},
            }
        }

        Completion::Finished
    }

    /// Run to the end without reading the rotations and return how many
    /// permutations were generated.
    pub fn count(&mut self) -> u64 {
        let mut total: u64 = 0;

        if let Some(cursor) = self.cursor.take() {
            total += self.window.remaining(cursor) as u64;
            self.next_base();
        }

        while !self.is_done() {
            self.sync();
            total += self.window.skim();
            self.next_base();
        }

        total
    }

    /// Run to the end, recording every permutation.
    pub fn tally(&mut self) -> Tally {
        let mut tally = Tally::new();
        self.for_each(|p| tally.record(p));
        tally
    }
}

//! Filepath: src/generator.rs
//!
//! Strategy polymorphism.
//!
//! Every generator shares the odometer contract and termination condition,
//! so callers can swap one for another and compare their output directly.

use std::convert::Infallible;

use crate::config::{Config, Strategy};
use crate::base::BaseGenerator;
use crate::engine::{CircleEngine, PureCircleEngine, WindowEngine};
use crate::error::Result;
use crate::heap::HeapGenerator;
use crate::insertion::InsertionSweep;
use crate::tally::Tally;

/// A resettable enumeration of every permutation of `0..n`.
pub trait Generator {
    /// Permutation length.
    fn n(&self) -> usize;

    /// Whether the enumeration has finished.
    fn is_done(&self) -> bool;

    /// Rewind to the first permutation.
    fn reset(&mut self);

    /// Visit every remaining permutation.
    ///
    /// # Errors
    /// Stops at and returns the first visitor error.
    fn try_for_each<E, F>(&mut self, visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>;

    /// Visit every remaining permutation with an infallible visitor.
    fn for_each<F>(&mut self, mut visit: F)
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

    /// Run to the end, recording every permutation.
    fn tally(&mut self) -> Tally {
        let mut tally = Tally::new();
        self.for_each(|p| tally.record(p));
        tally
    }
}

impl<B: BaseGenerator> Generator for WindowEngine<B> {
    fn n(&self) -> usize {
        Self::n(self)
    }

    fn is_done(&self) -> bool {
        Self::is_done(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn try_for_each<E, F>(&mut self, visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        Self::try_for_each(self, visit)
    }

    fn tally(&mut self) -> Tally {
        // Keeps the engine's own monomorphized loop.
        Self::tally(self)
    }
}

impl Generator for HeapGenerator {
    fn n(&self) -> usize {
        Self::n(self)
    }

    fn is_done(&self) -> bool {
        Self::is_done(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn try_for_each<E, F>(&mut self, visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        Self::try_for_each(self, visit)
    }
}

impl Generator for InsertionSweep {
    fn n(&self) -> usize {
        Self::n(self)
    }

    fn is_done(&self) -> bool {
        Self::is_done(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn try_for_each<E, F>(&mut self, visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        Self::try_for_each(self, visit)
    }
}

/// Generator chosen at run time from a [`Config`].
#[derive(Clone, Debug)]
pub enum Permutations {
    /// Cascade plus circular window.
    Circle(CircleEngine),

    /// Swap sweep plus circular window.
    PureCircle(PureCircleEngine),

    /// Heap's single transpositions.
    Heap(HeapGenerator),

    /// Insertion prefixes with a sweep of the largest element.
    Insertion(InsertionSweep),
}

impl Permutations {
    /// Allocate the generator `config` selects.
    ///
    /// # Errors
    /// [`Error::AllocationFailure`](crate::Error::AllocationFailure) if a
    /// buffer cannot be reserved.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(match config.strategy() {
            Strategy::Circle => Self::Circle(CircleEngine::new(config)?),
            Strategy::PureCircle => Self::PureCircle(PureCircleEngine::new(config)?),
            Strategy::Heap => Self::Heap(HeapGenerator::try_new(config.n())?),
            Strategy::Insertion => Self::Insertion(InsertionSweep::try_new(config.n())?),
        })
    }

    /// Strategy of the wrapped generator.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Circle(_) => Strategy::Circle,
            Self::PureCircle(_) => Strategy::PureCircle,
            Self::Heap(_) => Strategy::Heap,
            Self::Insertion(_) => Strategy::Insertion,
        }
    }
}

/// Forward a call to whichever generator is wrapped.
macro_rules! dispatch {
    ($self:expr, $g:ident => $call:expr) => {
        match $self {
            Permutations::Circle($g) => $call,
            Permutations::PureCircle($g) => $call,
            Permutations::Heap($g) => $call,
            Permutations::Insertion($g) => $call,
        }
    };
}

impl Generator for Permutations {
    fn n(&self) -> usize {
        dispatch!(self, g => g.n())
    }

    fn is_done(&self) -> bool {
        dispatch!(self, g => g.is_done())
    }

    fn reset(&mut self) {
        dispatch!(self, g => g.reset());
    }

    fn try_for_each<E, F>(&mut self, visit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        dispatch!(self, g => g.try_for_each(visit))
    }

    fn tally(&mut self) -> Tally {
        dispatch!(self, g => Generator::tally(g))
    }
}

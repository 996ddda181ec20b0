//! Base generators feeding the circle window.
//!
//! A base generator owns a permutation of `0..len` that tracks a falling
//! [`Odometer`](crate::Odometer). Each advance is forwarded through
//! [`BaseGenerator::apply`] with the carry report, and the generator performs
//! its corrective updates in place. The window engine is generic over this
//! trait, so the relocation cascade and the swap sweep drive the same
//! expansion.

use crate::config::Strategy;
use crate::error::Result;
use crate::odometer::Carry;

/// In-place generator of base permutations driven by a falling odometer.
pub trait BaseGenerator: Sized {
    /// Strategy that selects this generator.
    const STRATEGY: Strategy;

    /// Allocate a generator for bases of `len` elements, on behalf of a run
    /// of length `n`, positioned at the odometer origin.
    ///
    /// # Errors
    /// [`Error::AllocationFailure`](crate::Error::AllocationFailure) if a
    /// buffer cannot be reserved.
    fn allocate(n: usize, len: usize) -> Result<Self>;

    /// Current base permutation.
    fn base(&self) -> &[u8];

    /// Recompute the base for an arbitrary odometer state.
    fn rebuild(&mut self, digits: &[usize]);

    /// Follow one odometer advance. `digits` is the state after the advance
    /// that produced `carry`.
    fn apply(&mut self, carry: Carry, digits: &[usize]);
}

//! # circleperm
//!
//! Non-recursive generation of every permutation of `0..N`, built for raw
//! throughput.
//!
//! The generator never recurses and never allocates after setup:
//! - A mixed-radix [`Odometer`] enumerates the `(N - 2)!` base states.
//! - A [`CascadeGenerator`] maps each odometer state to a base permutation of
//!   `0..N-2` by relocating elements, rebuilding only the rows whose digit
//!   changed.
//! - A [`CircleWindow`] appends `N - 2, N - 1`, mirrors the primary region into
//!   a `3N - 3` cell buffer and emits `N (N - 1)` permutations per base as
//!   contiguous zero-copy slices.
//!
//! The window engine is generic over its [`BaseGenerator`].
//! [`PureCircleEngine`] replaces the cascade with a [`SwapBase`] sweep that
//! reaches each base from the previous one by a few swaps.
//!
//! Two generators skip the window entirely. [`HeapGenerator`] runs Heap's
//! algorithm on a rising odometer, one transposition per permutation.
//! [`InsertionSweep`] builds `(N - 1)!` prefixes by insertion and sweeps the
//! largest element across each. All four implement [`Generator`] and produce
//! the same set.
//!
//! ## Status
//!
//! | Feature | Status |
//! |---------|--------|
//! | Circle engine, N in 4..=20 | Works |
//! | Pure circle engine, N in 4..=20 | Works |
//! | Heap's algorithm, N in 1..=20 | Works |
//! | Insertion sweep, N in 2..=20 | Works |
//! | Partitioned parallel runs | Works (window strategies only) |
//! | Superpermutations | Works, N in 4..=9 |
//!
//! ## Usage
//!
//! ```rust
//! use circleperm::{Strategy, Tally};
//!
//! let mut seen = 0u64;
//! circleperm::for_each_permutation(5, |p| {
//!     assert_eq!(p.len(), 5);
//!     seen += 1;
//! })?;
//! assert_eq!(seen, 120);
//!
//! assert_eq!(circleperm::tally(6, Strategy::Heap)?, Tally::expected(6));
//! # Ok::<(), circleperm::Error>(())
//! ```
//!
//! Slices handed to a visitor are views into the engine's buffer and are
//! valid only for the duration of the call. Copy them out to keep them.
//!
//! ## Logging
//!
//! With the `tracing` feature, configuration, allocation, partition and
//! cancellation boundaries emit `tracing` events. Nothing is logged per
//! permutation.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// The hot loops are measured with divan; #[inline(always)] placement is deliberate.
#![allow(clippy::inline_always)]

mod tracing_helpers;

pub mod base;
pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heap;
pub mod insertion;
pub mod odometer;
pub mod parallel;
pub mod superperm;
pub mod swap_base;
pub mod tally;
pub mod window;

pub use base::BaseGenerator;
pub use cascade::CascadeGenerator;
pub use config::{Config, MAX_N, Strategy, configure, factorial};
pub use engine::{CircleEngine, Completion, PureCircleEngine, WindowEngine};
pub use error::{BoxError, Error, Result};
pub use generator::{Generator, Permutations};
pub use grid::FlatGrid;
pub use heap::HeapGenerator;
pub use insertion::InsertionSweep;
pub use odometer::{Carry, Odometer, Order};
pub use parallel::{Partition, par_count, par_tally, partitions};
pub use superperm::{MAX_SUPERPERM_N, superpermutation};
pub use swap_base::SwapBase;
pub use tally::Tally;
pub use window::{CircleWindow, Cursor};

/// Visit every permutation of `0..n` in circle order.
///
/// # Errors
/// [`Error::InvalidParameter`] unless `4 <= n <= 20`, or
/// [`Error::AllocationFailure`] if the buffers cannot be reserved.
pub fn for_each_permutation<F>(n: usize, visit: F) -> Result<()>
where
    F: FnMut(&[u8]),
{
    CircleEngine::with_n(n)?.for_each(visit);
    Ok(())
}

/// Visit every permutation of `0..n` in circle order with a fallible visitor.
///
/// # Errors
/// Configuration errors as for [`for_each_permutation`]; the first visitor
/// error is returned as [`Error::Visitor`] and ends the run.
pub fn try_for_each_permutation<E, F>(n: usize, mut visit: F) -> Result<()>
where
    E: Into<BoxError>,
    F: FnMut(&[u8]) -> Result<(), E>,
{
    CircleEngine::with_n(n)?.try_for_each(|p| visit(p).map_err(Error::visitor))
}

/// Number of permutations a full circle run over `0..n` emits.
///
/// # Errors
/// See [`for_each_permutation`].
pub fn count(n: usize) -> Result<u64> {
    Ok(CircleEngine::with_n(n)?.count())
}

/// Run `strategy` over `0..n` and return its count and checksum.
///
/// # Errors
/// See [`configure`] and [`Permutations::new`].
pub fn tally(n: usize, strategy: Strategy) -> Result<Tally> {
    let config: Config = configure(n, strategy)?;
    Ok(Permutations::new(&config)?.tally())
}

/// Install a console `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored. A no-op without the
/// `tracing` feature.
pub fn init_tracing() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("circleperm=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init();
    }
}

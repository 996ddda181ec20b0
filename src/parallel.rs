//! Filepath: src/parallel.rs
//!
//! Partitioned enumeration across rayon workers.
//!
//! Generation itself is strictly sequential. The only parallelism is across
//! disjoint ranges of base states: a [`Partition`] fixes the odometer digits
//! `1..=depth`, and every partition runs its own private window engine.
//! Nothing mutable is shared between workers; results are folded afterwards.
//!
//! Heap's generator and the insertion sweep have no base states to split and
//! always run sequentially.

use rayon::prelude::*;

use crate::base::BaseGenerator;
use crate::cascade::CascadeGenerator;
use crate::config::{Config, Strategy, configure, factorial};
use crate::engine::{CircleEngine, WindowEngine};
use crate::swap_base::SwapBase;
use crate::error::{Error, Result};
use crate::generator::{Generator, Permutations};
use crate::tally::Tally;
use crate::tracing_helpers::{debug_log, info_log, warn_log};

/// Partitions requested per rayon worker by [`auto_depth`].
const PARTITIONS_PER_THREAD: u64 = 4;

/// A fixed prefix of odometer digits `1..=prefix.len()`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Partition {
    prefix: Vec<usize>,
}

impl Partition {
    /// Partition with the given digit prefix.
    ///
    /// # Panics
    /// Panics in debug mode if `prefix[k] > k + 1`.
    #[must_use]
    pub fn new(prefix: Vec<usize>) -> Self {
        debug_assert!(
            prefix.iter().enumerate().all(|(k, &d)| d <= k + 1),
            "partition digit out of bounds: {prefix:?}"
        );

        Self { prefix }
    }

    /// Fixed digits, starting at odometer digit 1.
    #[must_use]
    pub fn prefix(&self) -> &[usize] {
        &self.prefix
    }

    /// Number of fixed digits.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.prefix.len()
    }

    /// Circle engine positioned at the first base state of this partition.
    ///
    /// # Errors
    /// See [`WindowEngine::new`].
    pub fn engine(&self, config: &Config) -> Result<CircleEngine> {
        self.restricted(config)
    }

    /// Window engine over any base generator, restricted to this partition.
    ///
    /// # Errors
    /// See [`WindowEngine::new`].
    pub fn restricted<B: BaseGenerator>(&self, config: &Config) -> Result<WindowEngine<B>> {
        let mut engine: WindowEngine<B> = WindowEngine::new(config)?;
        engine.restrict(&self.prefix);
        Ok(engine)
    }
}

/// Largest partition depth for length `n`: every free digit but the last
/// may be fixed, which leaves one base state per partition.
#[must_use]
pub const fn max_depth(n: usize) -> usize {
    n.saturating_sub(3)
}

/// Smallest depth giving at least [`PARTITIONS_PER_THREAD`] partitions per
/// rayon worker, capped at [`max_depth`].
#[must_use]
pub fn auto_depth(n: usize) -> usize {
    let wanted: u64 = rayon::current_num_threads() as u64 * PARTITIONS_PER_THREAD;
    let cap: usize = max_depth(n);

    (0..=cap)
        .find(|&depth| factorial(depth + 1) >= wanted)
        .unwrap_or(cap)
}

/// Every partition of depth `depth` for length `n`, in odometer order.
/// There are `(depth + 1)!` of them and together they cover each base state
/// exactly once.
///
/// # Errors
/// [`Error::InvalidParameter`] if `n` is not a valid circle length or
/// `depth > max_depth(n)`.
pub fn partitions(n: usize, depth: usize) -> Result<Vec<Partition>> {
    configure(n, Strategy::Circle)?;

    if depth > max_depth(n) {
        return Err(Error::InvalidParameter {
            n,
            min: crate::config::MIN_CIRCLE_N,
            max: crate::config::MAX_N,
        });
    }

    let mut out: Vec<Partition> = Vec::new();
    let mut prefix: Vec<usize> = vec![0; depth];

    // Odometer over the prefix itself: digit k has bound k + 1.
    loop {
        out.push(Partition::new(prefix.clone()));

        let mut k: usize = depth;
        loop {
            if k == 0 {
                return Ok(out);
            }

            k -= 1;
            prefix[k] += 1;

            if prefix[k] <= k + 1 {
                break;
            }
            prefix[k] = 0;
        }
    }
}

/// Tally a full run by splitting it into `(depth + 1)!` partitions and
/// running them on rayon's pool.
///
/// Strategies without a window run sequentially and ignore `depth`.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `depth > max_depth(n)`.
/// - [`Error::AllocationFailure`] if any worker cannot allocate its engine.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(config), fields(n = config.n())))]
pub fn par_tally(config: &Config, depth: usize) -> Result<Tally> {
    match config.strategy() {
        Strategy::Circle => tally_partitions::<CascadeGenerator>(config, depth),
        Strategy::PureCircle => tally_partitions::<SwapBase>(config, depth),
        Strategy::Heap | Strategy::Insertion => {
            warn_log!(
                n = config.n(),
                strategy = %config.strategy(),
                "par_tally: no partitioning, running sequentially"
            );
            Ok(Permutations::new(config)?.tally())
        }
    }
}

fn tally_partitions<B: BaseGenerator>(config: &Config, depth: usize) -> Result<Tally> {
    let parts: Vec<Partition> = partitions(config.n(), depth)?;
    info_log!(partitions = parts.len(), depth, strategy = %B::STRATEGY, "par_tally: start");

    let tally: Tally = parts
        .par_iter()
        .map(|part| {
            let mut engine: WindowEngine<B> = part.restricted(config)?;
            let tally: Tally = engine.tally();
            debug_log!(prefix = ?part.prefix(), count = tally.count, "par_tally: partition done");
            Ok::<Tally, Error>(tally)
        })
        .try_reduce(Tally::new, |a, b| Ok(a + b))?;

    info_log!(count = tally.count, checksum = tally.checksum, "par_tally: done");
    Ok(tally)
}

/// Count all permutations of length `n` in parallel.
///
/// # Errors
/// See [`configure`] and [`par_tally`].
pub fn par_count(n: usize) -> Result<u64> {
    let config: Config = configure(n, Strategy::Circle)?;
    let parts: Vec<Partition> = partitions(n, auto_depth(n))?;

    parts
        .par_iter()
        .map(|part| Ok::<u64, Error>(part.engine(&config)?.count()))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

//! Error taxonomy for configuration and enumeration.
//!
//! Configuration errors are reported before any buffer is allocated. Once an
//! engine exists, the only way a run can fail is through a fallible visitor.

use thiserror::Error as ThisError;

/// Boxed error produced by a fallible visitor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`configure`](crate::configure) and the enumeration
/// entry points.
#[derive(Debug, ThisError)]
pub enum Error {
    /// N is outside the range the selected strategy supports.
    #[error("invalid permutation length {n}: supported range is {min}..={max}")]
    InvalidParameter {
        /// Requested length.
        n: usize,
        /// Smallest supported length.
        min: usize,
        /// Largest supported length.
        max: usize,
    },

    /// Reserving the run's buffers failed. No enumeration was attempted.
    #[error("failed to allocate {bytes} bytes of buffers for n = {n}")]
    AllocationFailure {
        /// Requested length.
        n: usize,
        /// Size of the reservation that failed.
        bytes: usize,
    },

    /// A visitor returned an error; the enumeration stopped at that permutation.
    #[error("visitor aborted the enumeration")]
    Visitor(#[source] BoxError),
}

impl Error {
    /// Wrap a visitor failure.
    pub fn visitor<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Visitor(err.into())
    }

    /// Whether the error came from configuration rather than from a visitor.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::AllocationFailure { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reserve exactly `len` zeroed elements, mapping a failed reservation to
/// [`Error::AllocationFailure`].
pub(crate) fn try_zeroed<T: Copy + Default>(n: usize, len: usize) -> Result<Vec<T>> {
    let mut buf: Vec<T> = Vec::new();

    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure {
            n,
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;

    buf.resize(len, T::default());
    Ok(buf)
}

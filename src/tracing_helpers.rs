//! Filepath: src/tracing_helpers.rs
//!
//! Zero-cost logging macros.
//!
//! With the `tracing` feature the macros forward to the `tracing` crate.
//! Without it (the default) they expand to nothing, so the generation loop
//! carries no logging cost at all.
//!
//! ```bash
//! # Release build, no logging
//! cargo build --release
//!
//! # Log configuration and partition boundaries
//! RUST_LOG=circleperm=debug cargo run --release --features tracing -- 12 circle --par
//! ```
//!
//! None of these macros may be used inside a burst. The engine logs at
//! configuration, allocation, partition and cancellation boundaries only.

#![allow(unused_macros, unused_imports)]

/// Debug-level event. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

/// Info-level event. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! info_log {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! info_log {
    ($($arg:tt)*) => {};
}

/// Warn-level event. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use info_log;
pub(crate) use warn_log;

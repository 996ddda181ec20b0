//! Shared test utilities: tracing setup and reference oracles.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `circleperm=debug`)
//! - `CIRCLEPERM_LOG_DIR`: Log directory (default: `logs/`)
//! - `CIRCLEPERM_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! Library events are only emitted when the crate is built with
//! `--features tracing`.
//!
//! # Log Files
//!
//! Logs are appended to `logs/circleperm.jsonl` as newline-delimited JSON.
//!
//! ```bash
//! cat logs/circleperm.jsonl | jq 'select(.fields.partitions != null)'
//! ```

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing();
    });
}

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log file name.
    pub log_file: String,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: "circleperm.jsonl".to_string(),
            console_enabled: true,
            default_level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CIRCLEPERM_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if env::var("CIRCLEPERM_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

#[expect(clippy::expect_used)]
fn setup_tracing() {
    let config = TracingConfig::from_env();

    std::fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

    let log_path = config.log_dir.join(&config.log_file);

    // Append: each integration test binary opens the same file.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let console_layer = if config.console_enabled {
        Some(
            tracing_subscriber::fmt::layer()
                .with_thread_names(true)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .compact()
                .with_filter(make_filter(config.default_level)),
        )
    } else {
        None
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_thread_ids(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_filter(make_filter(config.default_level));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// =============================================================================
// Oracles
// =============================================================================

/// Every permutation of `0..n` in lexicographic order, by repeated
/// next-permutation. Only for small `n`.
pub fn lexicographic(n: usize) -> Vec<Vec<u8>> {
    let mut current: Vec<u8> = (0..n as u8).collect();
    let mut out: Vec<Vec<u8>> = vec![current.clone()];

    loop {
        let Some(i) = (1..current.len()).rev().find(|&i| current[i - 1] < current[i]) else {
            return out;
        };

        let pivot = i - 1;
        let Some(j) = (i..current.len()).rev().find(|&j| current[j] > current[pivot]) else {
            return out;
        };

        current.swap(pivot, j);
        current[i..].reverse();
        out.push(current.clone());
    }
}

/// Whether `p` is a permutation of `0..p.len()`.
pub fn is_permutation(p: &[u8]) -> bool {
    let mut seen = vec![false; p.len()];

    p.iter().all(|&v| {
        let v = usize::from(v);
        v < seen.len() && !std::mem::replace(&mut seen[v], true)
    })
}

/// Collect a visitor-driven run into an ordered set, panicking on repeats.
pub fn collect_unique<F>(run: F) -> BTreeSet<Vec<u8>>
where
    F: FnOnce(&mut dyn FnMut(&[u8])),
{
    let mut out: BTreeSet<Vec<u8>> = BTreeSet::new();
    run(&mut |p: &[u8]| {
        assert!(out.insert(p.to_vec()), "repeated permutation {p:?}");
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init() {
        init_tracing();
        tracing::info!("Tracing initialized successfully");
    }

    #[test]
    fn test_lexicographic_oracle() {
        let all = lexicographic(4);
        assert_eq!(all.len(), 24);
        assert_eq!(all[0], vec![0, 1, 2, 3]);
        assert_eq!(all[23], vec![3, 2, 1, 0]);
        assert!(all.iter().all(|p| is_permutation(p)));
    }
}

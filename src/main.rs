//! Benchmark driver.
//!
//! Runs one full enumeration and prints a fixed-format report that harness
//! scripts can scrape.
//!
//! Run with:
//! ```bash
//! cargo run --release -- 12 circle
//! cargo run --release -- 13 circle --par
//! cargo run --release -- 12 pure --par
//! CIRCLEPERM_N=11 cargo run --release -- heap
//! cargo run --release -- 11 insertion
//! RUST_LOG=circleperm=debug cargo run --release --features tracing -- 10
//! ```
//!
//! For `N <= 5` every permutation is printed as it is produced.

use std::env;
use std::fmt as StdFmt;
use std::process;
use std::time::{Duration, Instant};

use circleperm::parallel::auto_depth;
use circleperm::{Config, Generator, Permutations, Strategy, Tally, configure, par_tally};

const DEFAULT_N: usize = 12;

/// Largest N whose permutations are echoed to stdout.
const PRINT_LIMIT: usize = 5;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug)]
struct Args {
    n: usize,
    strategy: Strategy,
    parallel: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut n: Option<usize> = None;
    let mut strategy = Strategy::default();
    let mut parallel = false;

    for arg in env::args().skip(1) {
        if arg == "--par" {
            parallel = true;
        } else if let Ok(value) = arg.parse::<usize>() {
            n = Some(value);
        } else {
            strategy = arg.parse()?;
        }
    }

    let n: usize = match n {
        Some(n) => n,
        None => match env::var("CIRCLEPERM_N") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("CIRCLEPERM_N is not a number: {raw}"))?,
            Err(_) => DEFAULT_N,
        },
    };

    Ok(Args { n, strategy, parallel })
}

// =============================================================================
// Report
// =============================================================================

struct Report {
    algorithm: String,
    n: usize,
    elapsed: Duration,
    tally: Tally,
}

impl StdFmt::Display for Report {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        writeln!(f)?;
        writeln!(f, "REPORT_START")?;
        writeln!(f, "ALGORITHM: {}", self.algorithm)?;
        writeln!(f, "N_VALUE: {}", self.n)?;
        writeln!(f, "EXECUTION_TIME: {:.6}", self.elapsed.as_secs_f64())?;
        writeln!(f, "CHECKSUM: {}", self.tally.checksum)?;
        writeln!(f, "COUNT: {}", self.tally.count)?;
        write!(f, "REPORT_END")
    }
}

fn algorithm_name(config: &Config, parallel: bool) -> String {
    if parallel && config.strategy().uses_window() {
        format!("{}_par", config.strategy())
    } else {
        config.strategy().to_string()
    }
}

fn run(args: &Args) -> circleperm::Result<Report> {
    let config: Config = configure(args.n, args.strategy)?;
    let echo: bool = config.n() <= PRINT_LIMIT;

    let (tally, elapsed) = if args.parallel && !echo && config.strategy().uses_window() {
        let depth: usize = auto_depth(config.n());

        let start = Instant::now();
        let tally = par_tally(&config, depth)?;
        (tally, start.elapsed())
    } else {
        let mut generator = Permutations::new(&config)?;

        if echo {
            let mut tally = Tally::new();
            let start = Instant::now();
            generator.for_each(|p| {
                println!("{p:?}");
                tally.record(p);
            });
            (tally, start.elapsed())
        } else {
            let start = Instant::now();
            let tally = generator.tally();
            (tally, start.elapsed())
        }
    };

    Ok(Report {
        algorithm: algorithm_name(&config, args.parallel && !echo),
        n: config.n(),
        elapsed,
        tally,
    })
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    circleperm::init_tracing();

    let args: Args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("usage: circleperm [N] [circle|pure|heap|insertion] [--par]");
            process::exit(2);
        }
    };

    match run(&args) {
        Ok(report) => {
            let expected = Tally::expected(report.n);
            if report.tally != expected {
                eprintln!(
                    "warning: tally {:?} differs from closed form {:?}",
                    report.tally, expected
                );
            }
            println!("{report}");
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

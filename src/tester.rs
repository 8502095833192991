//! Concurrent driver for the bucket table.
//!
//! Generates random keys, inserts them once serially and once from several
//! threads, and reports timings plus any key the parallel run lost or
//! stored with the wrong value.

use bucket_table::{Config, Table, DEFAULT_CAPACITY};
use clap::{ArgAction, Parser};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

use tracing::{error, info, trace};

const KEY_LEN: usize = 16;

fn init_tracing(quiet: bool, verbose: u8) {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (the library logs through `log`)
    if tracing_log::LogTracer::init().is_err() {
        eprintln!("log tracer already installed");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("BUCKET_TABLE_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }
}

/// Fill a bucket table from several threads and check nothing was lost
#[derive(Parser, Debug)]
#[command(name = "tester")]
struct Args {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of writer threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Entries inserted per thread
    #[arg(short, long, default_value_t = 25_000)]
    size: usize,

    /// Number of buckets
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Seed for key and value generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Total number of entries across all threads.
fn entry_count(threads: usize, size: usize) -> Result<usize, String> {
    if threads == 0 {
        return Err("at least one thread is required".to_string());
    }
    threads
        .checked_mul(size)
        .ok_or_else(|| format!("{threads} threads x {size} entries overflows usize"))
}

/// Distinct random keys, so the expected value of each key does not depend
/// on which thread wrote it.
fn generate(count: usize, seed: u64) -> Vec<(String, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(count);
    let mut entries = Vec::with_capacity(count);
    while entries.len() < count {
        let key: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(KEY_LEN)
            .map(char::from)
            .collect();
        if seen.insert(key.clone()) {
            entries.push((key, rng.random()));
        }
    }
    entries
}

fn fill_serial(table: &Table, entries: &[(String, u32)]) -> Duration {
    let start = Instant::now();
    for (key, value) in entries {
        table.add_entry(key, *value);
    }
    start.elapsed()
}

fn fill_parallel(table: &Table, entries: &[(String, u32)], threads: usize) -> Duration {
    let chunk = entries.len().div_ceil(threads).max(1);
    let start = Instant::now();
    thread::scope(|s| {
        for (worker, part) in entries.chunks(chunk).enumerate() {
            s.spawn(move || {
                trace!(worker, entries = part.len(), "worker started");
                for (key, value) in part {
                    table.add_entry(key, *value);
                }
            });
        }
    });
    start.elapsed()
}

/// Keys that are absent or hold a value other than the one written.
fn count_missing(table: &Table, entries: &[(String, u32)]) -> usize {
    entries
        .iter()
        .filter(|(key, value)| table.get(key) != Some(*value))
        .count()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose);

    let count = match entry_count(args.threads, args.size) {
        Ok(count) => count,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let build = || Config::new().capacity(args.capacity).build();
    let (serial, parallel) = match (build(), build()) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let entries = generate(count, args.seed);
    println!("Generation: {} usec", start.elapsed().as_micros());

    let elapsed = fill_serial(&serial, &entries);
    let serial_missing = count_missing(&serial, &entries);
    println!("Hash table serial: {} usec", elapsed.as_micros());
    println!("  - {serial_missing} missing");

    let elapsed = fill_parallel(&parallel, &entries, args.threads);
    let parallel_missing = count_missing(&parallel, &entries);
    println!(
        "Hash table {} threads: {} usec",
        args.threads,
        elapsed.as_micros()
    );
    println!("  - {parallel_missing} missing");

    info!(
        serial_len = serial.len(),
        parallel_len = parallel.len(),
        "done"
    );
    serial.destroy();
    parallel.destroy();

    if serial_missing + parallel_missing > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_count_rejects_zero_threads() {
        assert!(entry_count(0, 10).is_err());
        assert_eq!(entry_count(3, 0), Ok(0));
    }

    #[test]
    fn entry_count_rejects_overflow() {
        assert!(entry_count(usize::MAX, 2).is_err());
        assert!(entry_count(1 << (usize::BITS / 2), 1 << (usize::BITS / 2)).is_err());
        assert_eq!(entry_count(4, 25_000), Ok(100_000));
    }

    #[test]
    fn generate_is_deterministic_and_distinct() {
        let a = generate(2_000, 42);
        let b = generate(2_000, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2_000);
        let keys: HashSet<&str> = a.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.len(), a.len());
        assert!(a.iter().all(|(k, _)| k.len() == KEY_LEN));
        assert_ne!(generate(10, 1), generate(10, 2));
    }

    #[test]
    fn parallel_fill_loses_nothing() {
        let entries = generate(10_000, 7);
        for threads in [1, 3, 8] {
            let table = Table::with_capacity(257);
            fill_parallel(&table, &entries, threads);
            assert_eq!(table.len(), entries.len());
            assert_eq!(count_missing(&table, &entries), 0);
        }
    }

    #[test]
    fn parallel_fill_with_more_threads_than_entries() {
        let entries = generate(3, 9);
        let table = Table::with_capacity(4);
        fill_parallel(&table, &entries, 16);
        assert_eq!(count_missing(&table, &entries), 0);
    }

    #[test]
    fn count_missing_flags_absent_and_wrong_values() {
        let entries = generate(4, 11);
        let table = Table::with_capacity(8);
        fill_serial(&table, &entries[..3]);
        table.add_entry(&entries[0].0, entries[0].1.wrapping_add(1));
        assert_eq!(count_missing(&table, &entries), 2);
    }
}

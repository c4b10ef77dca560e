#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```
//! mod common;
//! use common::*;
//! ```

use std::sync::Once;

use parking_lot::Mutex;
use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use qx::types::{AsyncValue, Resolver, deferred};
use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Default seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED_5EED;

const PROPTEST_SEED_ENV: &str = "QX_PROPTEST_SEED";

/// Build a ProptestConfig with deterministic seed support for CI.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);
    // Honor an existing PROPTEST_RNG_SEED, otherwise apply our own.
    if matches!(config.rng_seed, RngSeed::Random) {
        if let Some(seed) = read_proptest_seed() {
            config.rng_seed = RngSeed::Fixed(seed);
        }
    }
    config
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }
    // If CI is set and no explicit seed is provided, use a fixed seed.
    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }
    None
}

/// Initialize test logging with trace-level output.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Pending values settled by hand, in whatever order a test chooses.
pub struct ManualValues<T, E> {
    resolvers: Mutex<Vec<Option<Resolver<T, E>>>>,
}

impl<T, E> ManualValues<T, E> {
    /// Creates `n` pending values and returns them with their controller.
    pub fn new(n: usize) -> (Self, Vec<AsyncValue<T, E>>) {
        let (resolvers, values): (Vec<_>, Vec<_>) = (0..n)
            .map(|_| {
                let (resolver, value) = deferred();
                (Some(resolver), value)
            })
            .unzip();
        (
            Self {
                resolvers: Mutex::new(resolvers),
            },
            values,
        )
    }

    /// Settles slot `index`. Each slot can be settled once.
    pub fn settle(&self, index: usize, outcome: Result<T, E>)
    where
        T: Clone + 'static,
        E: Clone + 'static,
    {
        let resolver = self.resolvers.lock()[index].take();
        if let Some(resolver) = resolver {
            resolver.settle(outcome);
        }
    }
}

/// The indices `0..n` in a seeded random order.
pub fn shuffled_order(n: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    fastrand::Rng::with_seed(seed).shuffle(&mut order);
    order
}

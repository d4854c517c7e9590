// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Helpers shared by the tests and benchmarks.

extern crate rand;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use slog::Drain;

/// Create a simple `slog` logger for use in test programs.
///
/// If the environment variable `GALCENBAYES_TEST_LOG` is set, it logs to the
/// terminal using default parameters, as per the `slog` basic example.
/// Otherwise all records are discarded, so that test output stays readable.
pub fn default_log() -> slog::Logger {
    if std::env::var_os("GALCENBAYES_TEST_LOG").is_none() {
        return slog::Logger::root(slog::Discard, o!());
    }

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    slog::Logger::root(drain, o!())
}


/// A reproducible source of survey parameters.
///
/// Flux-density limits are drawn log-uniformly and everything else
/// uniformly, over the ranges spanned by real Galactic center surveys. The
/// generator is seeded so that a failing case can be reproduced.
pub struct SurveySampler {
    rng: StdRng,
}

impl SurveySampler {
    /// Create a new sampler with a fixed seed.
    pub fn new(seed: u64) -> Self {
        SurveySampler { rng: StdRng::seed_from_u64(seed) }
    }

    /// A flux-density limit in mJy, between 20 uJy and 3.5 mJy.
    pub fn smin(&mut self) -> f64 {
        let (lo, hi) = (0.02_f64.ln(), 3.5_f64.ln());
        self.rng.gen_range(lo..hi).exp()
    }

    /// An observing frequency in GHz, between 1.4 and 15.
    pub fn nu(&mut self) -> f64 {
        self.rng.gen_range(1.4..15.)
    }

    /// A (negative) power-law luminosity function exponent.
    pub fn beta(&mut self) -> f64 {
        self.rng.gen_range(-1.5..-0.3)
    }

    /// A magnetar fraction, avoiding the degenerate value zero.
    pub fn fraction(&mut self) -> f64 {
        self.rng.gen_range(0.001..0.999)
    }
}

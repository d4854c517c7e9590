// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Normalize a posterior and extract its summary statistics.

The quantile bounds use a strict comparison: the lower bound is the largest
*N* whose cumulative probability is still *below* 0.01, and likewise for the
median (0.5) and the upper bound (0.99). This is off by one from the usual
definition of a quantile, but it is what all previously published numbers
were computed with, so we keep it.

*/

use errors::{Error, Result};
use posterior::Posterior;


/// Cumulative probability defining the lower bound on *N*.
pub const LOWER_LEVEL: f64 = 0.01;

/// Cumulative probability defining the median of *N*.
pub const MEDIAN_LEVEL: f64 = 0.5;

/// Cumulative probability defining the upper bound on *N*.
pub const UPPER_LEVEL: f64 = 0.99;


/// The summary statistics of a posterior on *N*.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Summary {
    /// The posterior mean of *N*.
    pub mean: f64,

    /// The most probable *N*. Ties go to the smallest.
    pub mode: usize,

    /// The 99% lower bound on *N*.
    pub lower: usize,

    /// The median of *N*.
    pub median: usize,

    /// The 99% upper bound on *N*.
    pub upper: usize,
}


/// A normalized posterior probability mass function on *N*, together with
/// its cumulative distribution. As with `Posterior`, index zero is unused.
#[derive(Clone,Debug,PartialEq)]
pub struct Distribution {
    model: &'static str,
    pmf: Vec<f64>,
    cdf: Vec<f64>,
}


impl Distribution {
    /// Normalize an accumulated posterior.
    ///
    /// Fails if the posterior has no mass at all, which would otherwise turn
    /// every probability into NaN.
    pub fn normalize(posterior: Posterior) -> Result<Self> {
        let (model, mut pmf) = posterior.into_parts();

        let mut cdf = Vec::with_capacity(pmf.len());
        let mut running = 0_f64;

        for &p in &pmf {
            running += p;
            cdf.push(running);
        }

        if !(running > 0.) || !running.is_finite() {
            return Err(Error::EmptyPosterior { model: model, total: running });
        }

        for p in pmf.iter_mut() {
            *p /= running;
        }

        for c in cdf.iter_mut() {
            *c /= running;
        }

        Ok(Distribution {
            model: model,
            pmf: pmf,
            cdf: cdf,
        })
    }

    /// The name of the luminosity-function model.
    pub fn model_name(&self) -> &'static str {
        self.model
    }

    /// One more than the largest population size covered.
    pub fn n_max(&self) -> usize {
        self.pmf.len()
    }

    /// The normalized probabilities, indexed by *N*.
    pub fn pmf(&self) -> &[f64] {
        &self.pmf
    }

    /// The cumulative probabilities, indexed by *N*.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// The expectation value of *N*.
    pub fn mean(&self) -> f64 {
        self.pmf.iter().enumerate().map(|(n, &p)| n as f64 * p).sum()
    }

    /// The most probable *N*, taking the smallest one in case of ties.
    /// Returns zero if no *N* has positive probability, which normalization
    /// rules out.
    pub fn mode(&self) -> usize {
        let mut best = 0;
        let mut max = 0_f64;

        for (n, &p) in self.pmf.iter().enumerate().skip(1) {
            if p > max {
                max = p;
                best = n;
            }
        }

        best
    }

    /// The largest *N* whose cumulative probability is strictly less than
    /// `level`, or zero if there is none.
    pub fn bound(&self, level: f64) -> usize {
        // The CDF is non-decreasing, so the qualifying N's form a prefix
        // of 1..n_max.
        match self.cdf.get(1..) {
            Some(tail) => tail.partition_point(|&c| c < level),
            None => 0,
        }
    }

    /// Compute all of the summary statistics.
    pub fn summary(&self) -> Summary {
        Summary {
            mean: self.mean(),
            mode: self.mode(),
            lower: self.bound(LOWER_LEVEL),
            median: self.bound(MEDIAN_LEVEL),
            upper: self.bound(UPPER_LEVEL),
        }
    }
}

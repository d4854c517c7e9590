// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Bayesian limits on the number of pulsars in the Galactic center.

This crate implements the analysis of [Chennamangalam & Lorimer (2014;
DOI:10.1093/mnrasl/slt176)](https://dx.doi.org/10.1093/mnrasl/slt176). Given
a survey's flux-density limit and observing frequency, and the fact that it
found exactly one source (the magnetar), we compute the posterior probability
distribution of the total number of pulsars *N* in the surveyed region. A
fraction *f* of the population is assumed to be magnetar-like, with a
detectability that does not depend on spectral index.

Two luminosity-function models are supported: a lognormal (the default of
most population syntheses) and a power law. Both share the same integration
machinery through the `DetectionModel` trait. The unknown spectral index of
the ordinary sources is marginalized over with a Gaussian prior, using a
fixed-step Riemann sum.

The basic flow is:

1. Describe the survey with `SurveyParameters`.
2. Build an unnormalized `Posterior` for each model with a
   `PosteriorBuilder`.
3. Normalize it into a `Distribution` and extract its `Summary`.

The `analyze` function does all of this for both models.

*/

#![deny(missing_docs)]

#[cfg(test)] #[macro_use] extern crate assert_approx_eq;
#[macro_use] extern crate slog;
extern crate thiserror;

use slog::Logger;

mod errors;
pub mod erfc;
pub mod lognormal;
pub mod output;
pub mod params;
pub mod posterior;
pub mod power_law;
pub mod summary;

pub use errors::{Error, Result};
pub use lognormal::LognormalDistribution;
pub use params::{MAX_POPULATION, ModelConstants, SurveyParameters};
pub use posterior::{Posterior, PosteriorBuilder};
pub use power_law::PowerLawDistribution;
pub use summary::{Distribution, Summary};


/// A luminosity-function model that can tell us how likely a source is to be
/// detected.
pub trait DetectionModel: std::fmt::Debug {
    /// A short human-readable name for the model.
    fn name(&self) -> &'static str;

    /// The name of this model's detection probability in diagnostics.
    fn probability_label(&self) -> &'static str;

    /// The probability that a source drawn from this luminosity function is
    /// brighter than `luminosity` (in mJy kpc^2 at 1.4 GHz), and hence
    /// detected. Properly this lies in `[0, 1]`, but implementations do not
    /// clamp it: out-of-range values signal that the model is being used
    /// outside of its domain of validity.
    fn detection_probability(&self, luminosity: f64) -> f64;
}


/// The results of analyzing one survey under both luminosity-function
/// models.
#[derive(Clone,Debug,PartialEq)]
pub struct Analysis {
    /// The parameters that were analyzed.
    pub params: SurveyParameters,

    /// The posterior assuming a lognormal luminosity function.
    pub lognormal: Distribution,

    /// The posterior assuming a power-law luminosity function.
    pub power_law: Distribution,
}


/// Compute the posterior on *N* under both luminosity-function models.
///
/// The parameters are validated before any work is done. A detection
/// probability larger than one under either model aborts the whole analysis.
pub fn analyze(params: &SurveyParameters, logger: &Logger) -> Result<Analysis> {
    params.validate()?;

    info!(logger, "analyzing survey";
          "smin" => params.smin(),
          "nu" => params.nu(),
          "beta" => params.beta(),
          "n_max" => params.n_max(),
          "f" => params.magnetar_fraction(),
    );

    let ln = LognormalDistribution::for_survey(params);
    let ln_post = PosteriorBuilder::new(params, &ln, logger).build()?;

    let pl = PowerLawDistribution::for_survey(params);
    let pl_post = PosteriorBuilder::new(params, &pl, logger).build()?;

    Ok(Analysis {
        params: *params,
        lognormal: Distribution::normalize(ln_post)?,
        power_law: Distribution::normalize(pl_post)?,
    })
}


/// The magnetar fractions `start, start + step, ...` that do not exceed
/// `stop`. This is the sweep used to tabulate limits on *N* as a function of
/// *f*.
///
/// A sweep of more than `MAX_POPULATION` fractions (for instance, from a
/// vanishingly small step) is a configuration error.
pub fn fraction_sweep(start: f64, step: f64, stop: f64) -> Result<Vec<f64>> {
    if !(step > 0.) || !(start <= stop) {
        return Ok(if start == stop { vec![start] } else { Vec::new() });
    }

    // Allow for rounding in the step count so the end point is not lost.
    let n = ((stop - start) / step + 1e-9).floor();

    if !n.is_finite() || n >= MAX_POPULATION as f64 {
        return Err(Error::Configuration(format!(
            "a sweep from {} to {} in steps of {} has too many fractions (limit {})",
            start, stop, step, MAX_POPULATION)));
    }

    let n = n as usize;
    Ok((0..n + 1).map(|i| start + i as f64 * step).collect())
}

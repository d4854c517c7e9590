// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Survey parameters and the fixed constants of the population model.

A survey is characterized by its flux-density limit `smin` (mJy) and its
observing frequency `nu` (GHz). The analysis additionally needs the exponent
`beta` of the power-law luminosity function, the largest population size to
consider, and the assumed magnetar fraction `f`. Everything else is a
constant of the model, collected in `ModelConstants`.

*/

use errors::{Error, Result};


/// The largest `n_max` we are willing to allocate for. The posterior arrays
/// hold one value per population size.
pub const MAX_POPULATION: usize = 1_000_000;


/// The fixed physical and statistical constants of the model. The `Default`
/// values are the ones used by Chennamangalam & Lorimer (2014).
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct ModelConstants {
    /// Mean of the lognormal luminosity function, in log10(mJy kpc^2).
    pub mu: f64,

    /// Spread of the lognormal luminosity function, in dex.
    pub sigma: f64,

    /// Mean of the Gaussian prior on the spectral index.
    pub alpha_mean: f64,

    /// Standard deviation of the Gaussian prior on the spectral index.
    pub alpha_sigma: f64,

    /// How far either side of `alpha_mean` the spectral-index integral
    /// extends.
    pub alpha_half_width: f64,

    /// Step of the spectral-index Riemann sum.
    pub alpha_step: f64,

    /// Step in magnetar fraction, kept so that results are directly
    /// comparable with analyses that marginalize over `f`.
    pub fraction_step: f64,

    /// Distance to the Galactic center, in kpc.
    pub distance: f64,

    /// Frequency at which luminosities are quoted, in GHz.
    pub reference_frequency: f64,

    /// Luminosity floor of the power-law luminosity function, in mJy kpc^2.
    pub lmin: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        ModelConstants {
            mu: -1.1,
            sigma: 0.9,
            alpha_mean: -1.41,
            alpha_sigma: 0.96,
            alpha_half_width: 8.,
            alpha_step: 0.1,
            fraction_step: 0.1,
            distance: 8.25,
            reference_frequency: 1.4,
            lmin: 0.1,
        }
    }
}


/// Everything needed to compute a posterior on the number of sources.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct SurveyParameters {
    smin: f64,
    nu: f64,
    beta: f64,
    n_max: usize,
    fraction: f64,
    constants: ModelConstants,
}


impl SurveyParameters {
    /// Describe a survey with flux-density limit `smin` (mJy) at observing
    /// frequency `nu` (GHz). The posterior is evaluated for population sizes
    /// `1 <= N < n_max`, assuming a magnetar fraction `fraction` and a
    /// power-law luminosity function with exponent `beta`.
    ///
    /// The model constants take their default values.
    pub fn new(smin: f64, nu: f64, beta: f64, n_max: usize, fraction: f64) -> Self {
        SurveyParameters {
            smin: smin,
            nu: nu,
            beta: beta,
            n_max: n_max,
            fraction: fraction,
            constants: ModelConstants::default(),
        }
    }

    /// Replace the model constants.
    pub fn constants(mut self, constants: ModelConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Change the magnetar fraction, keeping everything else.
    pub fn fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }

    /// Check that the computation is one we can actually carry out.
    ///
    /// We deliberately do not police the physical plausibility of `smin`,
    /// `nu`, or `beta`; implausible values are caught by the
    /// detection-probability sanity checks instead.
    pub fn validate(&self) -> Result<()> {
        if self.n_max < 2 {
            return Err(Error::Configuration(format!(
                "maximum population size must be at least 2, got {}", self.n_max
            )));
        }

        if self.n_max > MAX_POPULATION {
            return Err(Error::Configuration(format!(
                "maximum population size {} exceeds the supported limit of {}",
                self.n_max, MAX_POPULATION
            )));
        }

        if !(self.fraction >= 0. && self.fraction <= 1.) {
            return Err(Error::Configuration(format!(
                "magnetar fraction must lie between 0 and 1, got {}", self.fraction
            )));
        }

        let c = &self.constants;

        if !(c.alpha_step > 0.) || !(c.alpha_half_width >= 0.) || !(c.alpha_sigma > 0.) {
            return Err(Error::Configuration(format!(
                "spectral-index grid is malformed (step {}, half-width {}, prior sigma {})",
                c.alpha_step, c.alpha_half_width, c.alpha_sigma
            )));
        }

        Ok(())
    }

    /// The flux-density limit, in mJy.
    pub fn smin(&self) -> f64 {
        self.smin
    }

    /// The observing frequency, in GHz.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// The power-law luminosity function exponent.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// One more than the largest population size considered.
    pub fn n_max(&self) -> usize {
        self.n_max
    }

    /// The magnetar fraction.
    pub fn magnetar_fraction(&self) -> f64 {
        self.fraction
    }

    /// The model constants in effect.
    pub fn model_constants(&self) -> &ModelConstants {
        &self.constants
    }

    /// The luminosity of a source at the Galactic center whose flux density
    /// at the survey frequency equals `smin`, given spectral index `alpha`.
    /// In mJy kpc^2 at the reference frequency.
    pub fn threshold_luminosity(&self, alpha: f64) -> f64 {
        let c = &self.constants;
        self.smin * (c.reference_frequency / self.nu).powf(alpha) * c.distance * c.distance
    }

    /// The threshold luminosity without any spectral correction. This is
    /// what governs the detectability of the magnetar-like sub-population.
    pub fn reference_luminosity(&self) -> f64 {
        self.smin * self.constants.distance * self.constants.distance
    }

    /// The spectral indices at which the posterior integrand is sampled.
    ///
    /// The grid runs from `alpha_mean - alpha_half_width` to `alpha_mean +
    /// alpha_half_width` inclusive. Points are computed from their index so
    /// that accumulated rounding cannot add or drop the final one.
    pub fn alpha_grid(&self) -> Vec<f64> {
        let c = &self.constants;
        let n_steps = (2. * c.alpha_half_width / c.alpha_step).round() as usize;
        let start = c.alpha_mean - c.alpha_half_width;
        (0..n_steps + 1).map(|i| start + i as f64 * c.alpha_step).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::{MAX_POPULATION, ModelConstants, SurveyParameters};

    fn fiducial() -> SurveyParameters {
        SurveyParameters::new(0.050, 4.85, -0.8, 100000, 0.010)
    }

    #[test]
    fn fiducial_is_valid() {
        assert!(fiducial().validate().is_ok());
    }

    #[test]
    fn rejects_bad_population_limits() {
        assert!(SurveyParameters::new(0.05, 4.85, -0.8, 0, 0.01).validate().is_err());
        assert!(SurveyParameters::new(0.05, 4.85, -0.8, 1, 0.01).validate().is_err());
        assert!(SurveyParameters::new(0.05, 4.85, -0.8, 2, 0.01).validate().is_ok());
        assert!(SurveyParameters::new(0.05, 4.85, -0.8, MAX_POPULATION, 0.01).validate().is_ok());
        assert!(SurveyParameters::new(0.05, 4.85, -0.8, MAX_POPULATION + 1, 0.01).validate().is_err());
    }

    #[test]
    fn rejects_bad_fractions() {
        assert!(fiducial().fraction(-0.1).validate().is_err());
        assert!(fiducial().fraction(1.5).validate().is_err());
        assert!(fiducial().fraction(::std::f64::NAN).validate().is_err());
        assert!(fiducial().fraction(0.).validate().is_ok());
        assert!(fiducial().fraction(1.).validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_grid() {
        let mut c = ModelConstants::default();
        c.alpha_step = 0.;
        assert!(fiducial().constants(c).validate().is_err());
    }

    #[test]
    fn default_grid() {
        let grid = fiducial().alpha_grid();
        assert_eq!(grid.len(), 161);
        assert_approx_eq!(grid[0], -9.41, 1e-12);
        assert_approx_eq!(grid[80], -1.41, 1e-12);
        assert_approx_eq!(grid[160], 6.59, 1e-12);
    }

    #[test]
    fn luminosities() {
        let p = fiducial();
        assert_approx_eq!(p.reference_luminosity(), 0.05 * 8.25 * 8.25, 1e-12);
        assert_approx_eq!(p.threshold_luminosity(0.), p.reference_luminosity(), 1e-12);

        // Steeper (more negative) spectra make a source fainter at high
        // frequency, so it has to be more luminous at 1.4 GHz to be seen.
        assert!(p.threshold_luminosity(-2.) > p.threshold_luminosity(-1.));

        let at_ref = SurveyParameters::new(0.05, 1.4, -0.8, 100, 0.01);
        assert_approx_eq!(at_ref.threshold_luminosity(-3.), at_ref.reference_luminosity(), 1e-12);
    }
}

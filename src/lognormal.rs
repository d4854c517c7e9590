// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The lognormal luminosity function.

The base-10 logarithm of the 1.4 GHz pseudo-luminosity (mJy kpc^2) is
normally distributed with mean `mu` and standard deviation `sigma`. The
probability of detecting a source is the fraction of the luminosity function
lying above the survey's threshold luminosity. Faucher-Giguère & Kaspi (2006)
give `mu = -1.1` and `sigma = 0.9`.

*/

use erfc::lognormal_upper_tail;
use params::SurveyParameters;
use super::DetectionModel;


/// Parameters of a lognormal luminosity function. See the module-level
/// documentation for details.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct LognormalDistribution {
    mu: f64,
    sigma: f64,
}


impl DetectionModel for LognormalDistribution {
    fn name(&self) -> &'static str {
        "lognormal"
    }

    fn probability_label(&self) -> &'static str {
        "theta"
    }

    fn detection_probability(&self, luminosity: f64) -> f64 {
        lognormal_upper_tail(luminosity.log10(), self.mu, self.sigma)
    }
}


impl LognormalDistribution {
    /// Create a lognormal luminosity function with log-space mean `mu` and
    /// spread `sigma`.
    pub fn new(mu: f64, sigma: f64) -> Self {
        LognormalDistribution { mu: mu, sigma: sigma }
    }

    /// The lognormal luminosity function implied by a set of survey
    /// parameters.
    pub fn for_survey(params: &SurveyParameters) -> Self {
        let c = params.model_constants();
        LognormalDistribution::new(c.mu, c.sigma)
    }
}


#[cfg(test)]
mod tests {
    use DetectionModel;
    use super::LognormalDistribution;

    #[test]
    fn half_at_median_luminosity() {
        let d = LognormalDistribution::new(-1.1, 0.9);
        assert_approx_eq!(d.detection_probability(10f64.powf(-1.1)), 0.5, 1e-7);
    }

    #[test]
    fn brighter_thresholds_are_harder() {
        let d = LognormalDistribution::new(-1.1, 0.9);
        let mut prev = 1.;

        for i in -30..30 {
            let theta = d.detection_probability(10f64.powf(0.2 * i as f64));
            assert!(theta >= 0. && theta <= 1.);
            assert!(theta <= prev);
            prev = theta;
        }
    }

    #[test]
    fn fiducial_survey_value() {
        // smin = 50 uJy at the Galactic center: log10(0.05 * 8.25^2) = 0.5319.
        let d = LognormalDistribution::new(-1.1, 0.9);
        let gamma = d.detection_probability(0.05 * 8.25 * 8.25);
        assert_approx_eq!(gamma, 0.03490, 1e-5);
    }
}

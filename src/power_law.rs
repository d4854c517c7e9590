// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The power-law luminosity function.

The cumulative luminosity function above the floor `lmin` scales as
`(L / lmin)^beta`, with `beta` negative for any physically sensible
population. Below the floor every source is bright enough to be seen, so the
detection probability is exactly one there. A positive `beta` yields
"probabilities" larger than one, which the posterior builder rejects.

*/

use params::SurveyParameters;
use super::DetectionModel;


/// Parameters for a power-law luminosity function. See the module-level
/// documentation for details.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct PowerLawDistribution {
    beta: f64,
    lmin: f64,
}


impl DetectionModel for PowerLawDistribution {
    fn name(&self) -> &'static str {
        "power-law"
    }

    fn probability_label(&self) -> &'static str {
        "theta_pl"
    }

    fn detection_probability(&self, luminosity: f64) -> f64 {
        if luminosity > self.lmin {
            (luminosity / self.lmin).powf(self.beta)
        } else {
            1.
        }
    }
}


impl PowerLawDistribution {
    /// Create a new power-law luminosity function with the specified
    /// exponent.
    ///
    /// The default luminosity floor is 0.1 mJy kpc^2.
    pub fn new(beta: f64) -> Self {
        PowerLawDistribution {
            beta: beta,
            lmin: 0.1,
        }
    }

    /// Alter the luminosity floor.
    pub fn lmin(mut self, lmin: f64) -> Self {
        self.lmin = lmin;
        self
    }

    /// The power-law luminosity function implied by a set of survey
    /// parameters.
    pub fn for_survey(params: &SurveyParameters) -> Self {
        PowerLawDistribution::new(params.beta()).lmin(params.model_constants().lmin)
    }
}


#[cfg(test)]
mod tests {
    use DetectionModel;
    use super::PowerLawDistribution;

    #[test]
    fn certain_below_floor() {
        for &beta in &[-2.5, -0.8, 0., 0.8, 3.] {
            let d = PowerLawDistribution::new(beta);
            assert_eq!(d.detection_probability(0.1), 1.);
            assert_eq!(d.detection_probability(0.01), 1.);
            assert_eq!(d.detection_probability(1e-9), 1.);
        }
    }

    #[test]
    fn falls_off_above_floor() {
        let d = PowerLawDistribution::new(-0.8);
        assert_approx_eq!(d.detection_probability(1.), 10f64.powf(-0.8), 1e-12);
        assert!(d.detection_probability(100.) < d.detection_probability(10.));
    }

    #[test]
    fn positive_exponent_exceeds_one() {
        let d = PowerLawDistribution::new(0.8);
        assert!(d.detection_probability(10.) > 1.);
    }

    #[test]
    fn custom_floor() {
        let d = PowerLawDistribution::new(-1.).lmin(1.);
        assert_eq!(d.detection_probability(0.5), 1.);
        assert_approx_eq!(d.detection_probability(4.), 0.25, 1e-12);
    }
}

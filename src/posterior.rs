// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Build the unnormalized posterior on the number of sources.

For each candidate population size *N* we integrate over the unknown spectral
index *alpha* with a fixed-step Riemann sum. At each *alpha* the integrand is
the probability that none of the `N (1 - f)` ordinary sources is detected,
times the Gaussian prior density on *alpha* (without its normalization, which
cancels once the posterior is normalized), times a binomial-style weight for
the `N f` magnetar-like sources yielding the single detection:

```text
(1 - theta(alpha))^(N (1 - f)) * exp(-(alpha - amean)^2 / 2 asig^2)
    * N f * gamma * (1 - gamma)^(N f - 1) * dalpha * df
```

The magnetar weight treats `N f` as a mean count rather than drawing an
integer sub-population size. That is the published model and we reproduce it
as is.

Neither *theta* nor *gamma* depends on *N*, so they are evaluated once per
build, and the sanity checks on them run before any mass is accumulated.

*/

use slog::Logger;

use errors::{Error, Result};
use lognormal::LognormalDistribution;
use params::SurveyParameters;
use super::DetectionModel;


/// The unnormalized probability mass for each population size. Index *N*
/// holds the mass of *N* sources; index zero is unused and always zero.
#[derive(Clone,Debug,PartialEq)]
pub struct Posterior {
    model: &'static str,
    mass: Vec<f64>,
}

impl Posterior {
    pub(crate) fn from_mass(model: &'static str, mass: Vec<f64>) -> Self {
        Posterior { model: model, mass: mass }
    }

    /// The name of the luminosity-function model this posterior was built
    /// with.
    pub fn model_name(&self) -> &'static str {
        self.model
    }

    /// The unnormalized masses, indexed by population size.
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    /// The total unnormalized mass.
    pub fn total(&self) -> f64 {
        self.mass.iter().sum()
    }

    pub(crate) fn into_parts(self) -> (&'static str, Vec<f64>) {
        (self.model, self.mass)
    }
}


/// The detection probability of the magnetar-like sub-population. This is
/// the lognormal luminosity function evaluated at the survey's threshold
/// luminosity without spectral correction, whichever model governs the
/// ordinary sources.
pub fn magnetar_detection_probability(params: &SurveyParameters) -> f64 {
    LognormalDistribution::for_survey(params).detection_probability(params.reference_luminosity())
}


/// The weight `N f gamma (1 - gamma)^(N f - 1)` of the magnetar-like
/// sub-population.
///
/// When `gamma` is exactly one and `N f < 1`, the power is a zero raised to a
/// negative exponent; we define the weight to be zero there instead of letting
/// an infinity or NaN into the sums. A zero count is likewise zero weight.
pub fn magnetar_weight(n: usize, fraction: f64, gamma: f64) -> f64 {
    let count = n as f64 * fraction;

    if count == 0. {
        return 0.;
    }

    let miss = 1. - gamma;

    if miss <= 0. && count < 1. {
        return 0.;
    }

    count * gamma * miss.powf(count - 1.)
}


/// NaN is not a probability either.
fn is_probability(x: f64) -> bool {
    x >= 0. && x <= 1.
}


#[derive(Copy,Clone,Debug,PartialEq)]
struct GridPoint {
    alpha: f64,
    miss: f64,
    prior: f64,
}


/// Computes the posterior for one luminosity-function model.
#[derive(Clone,Debug)]
pub struct PosteriorBuilder<'a, M: 'a> {
    params: &'a SurveyParameters,
    model: &'a M,
    logger: &'a Logger,
}


impl<'a, M: 'a + DetectionModel> PosteriorBuilder<'a, M> {
    /// Prepare to build a posterior. The parameters are assumed to have been
    /// validated already.
    pub fn new(params: &'a SurveyParameters, model: &'a M, logger: &'a Logger) -> Self {
        PosteriorBuilder {
            params: params,
            model: model,
            logger: logger,
        }
    }

    /// Evaluate the N-independent part of the integrand at every grid point,
    /// checking that every detection probability is sane.
    fn grid(&self) -> Result<Vec<GridPoint>> {
        let c = self.params.model_constants();
        let two_var = 2. * c.alpha_sigma * c.alpha_sigma;

        self.params.alpha_grid().into_iter().map(|alpha| {
            let ldet = self.params.threshold_luminosity(alpha);
            let theta = self.model.detection_probability(ldet);

            if !is_probability(theta) {
                error!(self.logger, "detection probability outside [0, 1]";
                       "model" => self.model.name(),
                       "quantity" => self.model.probability_label(),
                       "alpha" => alpha,
                       "ldet" => ldet,
                       "value" => theta,
                );
                return Err(Error::ImplausibleProbability {
                    model: self.model.name(),
                    quantity: self.model.probability_label(),
                    alpha: Some(alpha),
                    value: theta,
                });
            }

            let d = alpha - c.alpha_mean;

            Ok(GridPoint {
                alpha: alpha,
                miss: 1. - theta,
                prior: (-d * d / two_var).exp(),
            })
        }).collect()
    }

    /// Compute the unnormalized mass for every population size `1 <= N <
    /// n_max`.
    pub fn build(&self) -> Result<Posterior> {
        let c = self.params.model_constants();
        let n_max = self.params.n_max();
        let fraction = self.params.magnetar_fraction();

        let gamma = magnetar_detection_probability(self.params);

        if !is_probability(gamma) {
            error!(self.logger, "magnetar detection probability outside [0, 1]";
                   "model" => self.model.name(), "value" => gamma);
            return Err(Error::ImplausibleProbability {
                model: self.model.name(),
                quantity: "gamma",
                alpha: None,
                value: gamma,
            });
        }

        let grid = self.grid()?;

        debug!(self.logger, "building posterior";
               "model" => self.model.name(),
               "n_max" => n_max,
               "f" => fraction,
               "gamma" => gamma,
               "alpha_points" => grid.len(),
               "alpha_lo" => grid.first().map(|p| p.alpha),
               "alpha_hi" => grid.last().map(|p| p.alpha),
        );

        let step = c.alpha_step * c.fraction_step;
        let mut mass = vec![0_f64; n_max];

        for n in 1..n_max {
            let magnetars = magnetar_weight(n, fraction, gamma);

            if magnetars == 0. {
                trace!(self.logger, "no magnetar weight"; "n" => n);
                continue;
            }

            let ordinary = n as f64 * (1. - fraction);
            let integral: f64 = grid.iter()
                .map(|p| p.miss.powf(ordinary) * p.prior)
                .sum();

            mass[n] = integral * magnetars * step;
            trace!(self.logger, "population size"; "n" => n, "mass" => mass[n]);
        }

        debug!(self.logger, "posterior built"; "model" => self.model.name());

        Ok(Posterior::from_mass(self.model.name(), mass))
    }
}

// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Error types for the population analysis.

use std::io;
use std::result;

use thiserror::Error;


/// Everything that can go wrong while building or summarizing a posterior.
#[derive(Error, Debug)]
pub enum Error {
    /// The survey parameters describe a computation we refuse to start.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A detection probability came out outside of `[0, 1]` (or not a
    /// number).
    /// This means the luminosity-function model has been pushed into a
    /// regime where it is physically meaningless, and the whole run must
    /// stop.
    #[error("{model} model: {quantity} = {value} is not a probability (alpha = {alpha:?})")]
    ImplausibleProbability {
        /// Which luminosity-function model produced the value.
        model: &'static str,

        /// The name of the offending quantity ("theta", "theta_pl", "gamma").
        quantity: &'static str,

        /// The spectral index at which the value was computed, if it
        /// depends on one.
        alpha: Option<f64>,

        /// The offending value.
        value: f64,
    },

    /// The accumulated probability mass is zero (or not finite), so the
    /// posterior cannot be normalized. This is what a magnetar fraction of
    /// exactly zero produces.
    #[error("{model} model: cannot normalize a posterior with total mass {total}")]
    EmptyPosterior {
        /// Which luminosity-function model produced the posterior.
        model: &'static str,

        /// The total unnormalized mass.
        total: f64,
    },

    /// Failure writing results somewhere.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}


impl Error {
    /// Whether this error is a failure of the detection-probability sanity
    /// check, as opposed to a problem with the inputs or the environment.
    pub fn is_sanity_violation(&self) -> bool {
        match *self {
            Error::ImplausibleProbability { .. } => true,
            _ => false,
        }
    }
}


/// The result type used throughout this crate.
pub type Result<T> = result::Result<T, Error>;

//! Errors surfaced by the estimator.
//!
//! [ConfigurationError] is raised before any waveform is generated and is never
//! retried. [GenerationError] comes from the waveform provider, or from
//! inspecting what it produced.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::approximant::Domain;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unrecognized approximant {0:?}")]
    UnknownApproximant(String),

    #[error("f_min ({f_min} Hz) must be below the Nyquist frequency ({nyquist} Hz) of the starting sample rate")]
    AboveNyquist { f_min: f64, nyquist: f64 },

    #[error("{approximant} is a {domain} approximant and requires {parameter}")]
    MissingParameter {
        approximant: String,
        domain: Domain,
        parameter: &'static str,
    },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("Maximum sample rate ({max} Hz) is below the starting sample rate ({min} Hz)")]
    SampleRateCeiling { min: f64, max: f64 },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Waveform provider rejected the parameters: {0}")]
    Rejected(String),

    #[error("Unable to run waveform provider {program:?}")]
    Unavailable {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Waveform provider returned malformed output: {0}")]
    Malformed(String),

    #[error("Generated waveform carries no signal")]
    Empty,

    #[error("Unable to generate template; try increasing max sample rate (tried {attempts:?} Hz)")]
    Exhausted {
        attempts: Vec<f64>,
        #[source]
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Whether the time-domain loop should try again at a higher sample rate.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Rejected(_) | GenerationError::Malformed(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

//! Approximant names and the domain family each one is generated in.

use std::{fmt, str::FromStr};

use crate::error::ConfigurationError;

/// Approximants generated directly as time series.
const TIME_DOMAIN: &[&str] = &[
    "EOBNRv2",
    "EOBNRv2HM",
    "EccentricTD",
    "IMRPhenomT",
    "IMRPhenomTHM",
    "IMRPhenomTP",
    "IMRPhenomTPHM",
    "NRSur7dq4",
    "PhenSpinTaylor",
    "SEOBNRv1",
    "SEOBNRv2",
    "SEOBNRv2_opt",
    "SEOBNRv3",
    "SEOBNRv4",
    "SEOBNRv4_opt",
    "SEOBNRv4HM",
    "SEOBNRv4P",
    "SEOBNRv4PHM",
    "SpinTaylorT1",
    "SpinTaylorT4",
    "SpinTaylorT5",
    "TaylorEt",
    "TaylorT1",
    "TaylorT2",
    "TaylorT3",
    "TaylorT4",
];

/// Approximants generated directly as frequency series.
const FREQUENCY_DOMAIN: &[&str] = &[
    "EOBNRv2_ROM",
    "EOBNRv2HM_ROM",
    "IMRPhenomA",
    "IMRPhenomB",
    "IMRPhenomC",
    "IMRPhenomD",
    "IMRPhenomD_NRTidal",
    "IMRPhenomHM",
    "IMRPhenomPv2",
    "IMRPhenomPv2_NRTidal",
    "IMRPhenomXAS",
    "IMRPhenomXHM",
    "IMRPhenomXP",
    "IMRPhenomXPHM",
    "SEOBNRv2_ROM_DoubleSpin",
    "SEOBNRv4_ROM",
    "SEOBNRv4_ROM_NRTidal",
    "SEOBNRv5_ROM",
    "SpinTaylorF2",
    "TaylorF2",
    "TaylorF2NL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Time,
    Frequency,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Time => write!(f, "time-domain"),
            Domain::Frequency => write!(f, "frequency-domain"),
        }
    }
}

/// A named waveform model. Only names in the known tables can be constructed,
/// so the domain of an `Approximant` is always resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approximant {
    name: String,
    domain: Domain,
}

impl Approximant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }
}

impl FromStr for Approximant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let domain = if TIME_DOMAIN.contains(&s) {
            Domain::Time
        } else if FREQUENCY_DOMAIN.contains(&s) {
            Domain::Frequency
        } else {
            return Err(ConfigurationError::UnknownApproximant(s.to_string()));
        };
        Ok(Approximant {
            name: s.to_string(),
            domain,
        })
    }
}

impl fmt::Display for Approximant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Lists every known approximant with its domain, sorted by name.
pub fn known_approximants() -> Vec<(&'static str, Domain)> {
    let mut all: Vec<(&'static str, Domain)> = TIME_DOMAIN
        .iter()
        .map(|&name| (name, Domain::Time))
        .chain(FREQUENCY_DOMAIN.iter().map(|&name| (name, Domain::Frequency)))
        .collect();
    all.sort_by_key(|(name, _)| *name);
    all
}

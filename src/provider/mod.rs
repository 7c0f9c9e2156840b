//! The boundary between the estimator and whatever actually generates
//! waveforms.

pub mod external;

use crate::{
    error::GenerationError,
    phase,
    series::{TimeSeries, WaveformPair},
    waveform::WaveformSpec,
};

pub use external::ExternalProvider;

/// Sample spacing of a requested waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    DeltaT(f64),
    DeltaF(f64),
}

#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    spec: &'a WaveformSpec,
    sampling: Sampling,
    f_min: f64,
}

impl<'a> GenerationRequest<'a> {
    /// Time-domain request with time step `1 / sample_rate`.
    pub fn time_domain(spec: &'a WaveformSpec, sample_rate: f64, f_min: f64) -> Self {
        GenerationRequest {
            spec,
            sampling: Sampling::DeltaT(1.0 / sample_rate),
            f_min,
        }
    }

    /// Frequency-domain request with resolution `1 / segment_length`.
    pub fn frequency_domain(spec: &'a WaveformSpec, segment_length: f64, f_min: f64) -> Self {
        GenerationRequest {
            spec,
            sampling: Sampling::DeltaF(1.0 / segment_length),
            f_min,
        }
    }

    pub fn spec(&self) -> &'a WaveformSpec {
        self.spec
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn f_min(&self) -> f64 {
        self.f_min
    }
}

pub trait WaveformProvider {
    /// Generate both polarizations. Any error is the only signal the
    /// time-domain retry loop looks at.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<WaveformPair, GenerationError>;

    /// Instantaneous frequency (Hz) of a time-domain polarization pair.
    fn instantaneous_frequency(&self, plus: &TimeSeries, cross: &TimeSeries) -> Vec<f64> {
        phase::frequency_from_polarizations(plus, cross)
    }
}

impl<P: WaveformProvider + ?Sized> WaveformProvider for &P {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<WaveformPair, GenerationError> {
        (**self).generate(request)
    }

    fn instantaneous_frequency(&self, plus: &TimeSeries, cross: &TimeSeries) -> Vec<f64> {
        (**self).instantaneous_frequency(plus, cross)
    }
}

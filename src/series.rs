//! Uniformly sampled series produced by waveform providers.

use num_complex::Complex64;

use crate::error::GenerationError;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    data: Vec<f64>,
    delta_t: f64,
}

impl TimeSeries {
    pub fn new(data: Vec<f64>, delta_t: f64) -> Self {
        Self { data, delta_t }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length of the series in seconds.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 * self.delta_t
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySeries {
    data: Vec<Complex64>,
    delta_f: f64,
}

impl FrequencySeries {
    pub fn new(data: Vec<Complex64>, delta_f: f64) -> Self {
        Self { data, delta_f }
    }

    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    pub fn delta_f(&self) -> f64 {
        self.delta_f
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the highest-frequency bin with non-zero magnitude.
    pub fn last_nonzero_bin(&self) -> Option<usize> {
        self.data.iter().rposition(|x| x.norm() != 0.0)
    }
}

/// Both polarizations of a generated waveform, sharing one sample spacing.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveformPair {
    Time {
        plus: TimeSeries,
        cross: TimeSeries,
    },
    Frequency {
        plus: FrequencySeries,
        cross: FrequencySeries,
    },
}

impl WaveformPair {
    pub fn time(plus: TimeSeries, cross: TimeSeries) -> Result<Self, GenerationError> {
        if plus.len() != cross.len() {
            return Err(GenerationError::Malformed(format!(
                "hplus has {} samples but hcross has {}",
                plus.len(),
                cross.len()
            )));
        }
        Ok(WaveformPair::Time { plus, cross })
    }

    pub fn frequency(
        plus: FrequencySeries,
        cross: FrequencySeries,
    ) -> Result<Self, GenerationError> {
        if plus.len() != cross.len() {
            return Err(GenerationError::Malformed(format!(
                "hplus has {} bins but hcross has {}",
                plus.len(),
                cross.len()
            )));
        }
        Ok(WaveformPair::Frequency { plus, cross })
    }
}

/// Index of the last sample where `plus² + cross²` is non-zero.
pub fn last_nonzero_power(plus: &TimeSeries, cross: &TimeSeries) -> Option<usize> {
    plus.data()
        .iter()
        .zip(cross.data())
        .rposition(|(p, c)| p * p + c * c != 0.0)
}

/// Drops the zero padding some generators append after the signal ends.
/// Returns the number of samples kept; both series are left at that length.
pub fn trim_trailing_zeros(plus: &mut TimeSeries, cross: &mut TimeSeries) -> usize {
    let keep = last_nonzero_power(plus, cross).map_or(0, |idx| idx + 1);
    plus.truncate(keep);
    cross.truncate(keep);
    keep
}

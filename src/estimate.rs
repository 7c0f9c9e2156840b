//! Terminal frequency and duration of generated waveforms.
//!
//! Frequency-domain waveforms are generated once at `Δf = 1 / segment_length`
//! and the terminal frequency is read off the last non-zero bin of `hplus`.
//!
//! Time-domain waveforms are generated at the starting sample rate and, if the
//! provider fails, again at twice the rate until the ceiling is passed. Many
//! approximants fail or alias when the Nyquist frequency sits near the ringdown,
//! and which rates work is not known up front. The successful waveform has its
//! trailing zeros trimmed, its duration measured, and its terminal frequency
//! taken as the maximum instantaneous frequency.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    approximant::Domain,
    error::{ConfigurationError, EstimateError, GenerationError},
    provider::{GenerationRequest, WaveformProvider},
    series::{self, WaveformPair},
    waveform::WaveformSpec,
};

/// Result for a single waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalFreq {
    /// Terminal frequency in Hz
    pub f_final: f64,

    /// Trimmed signal length in seconds, time-domain only
    pub duration: Option<f64>,

    /// Sample rate the time-domain waveform was generated at
    pub sample_rate: Option<f64>,
}

/// How a validated spec will be generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plan {
    Frequency { segment_length: f64 },
    Time { min_rate: f64, max_rate: f64 },
}

#[derive(Debug, Clone)]
pub struct FinalFreqOptions {
    f_min: f64,
    sample_rate: Option<f64>,
    max_sample_rate: Option<f64>,
    segment_length: Option<f64>,
    progress: bool,
}

impl FinalFreqOptions {
    /// `f_min` is the low-frequency cutoff shared by every request.
    pub fn new(f_min: f64) -> Self {
        Self {
            f_min,
            sample_rate: None,
            max_sample_rate: None,
            segment_length: None,
            progress: false,
        }
    }

    /// Starting sample rate for time-domain approximants.
    pub fn sample_rate(&mut self, sample_rate: f64) -> &mut Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Highest sample rate the time-domain retry loop may reach. Defaults to
    /// the starting rate, so no retries.
    pub fn max_sample_rate(&mut self, max_sample_rate: f64) -> &mut Self {
        self.max_sample_rate = Some(max_sample_rate);
        self
    }

    /// Segment length in seconds for frequency-domain approximants.
    pub fn segment_length(&mut self, segment_length: f64) -> &mut Self {
        self.segment_length = Some(segment_length);
        self
    }

    /// Show a progress bar during [FinalFreqOptions::run_batch].
    pub fn progress(&mut self, progress: bool) -> &mut Self {
        self.progress = progress;
        self
    }

    pub fn f_min(&self) -> f64 {
        self.f_min
    }

    /// Every check that can be made without generating anything. Returns how
    /// the waveform for `spec` will be sampled.
    pub fn validate(&self, spec: &WaveformSpec) -> Result<Plan, ConfigurationError> {
        if !(self.f_min.is_finite() && self.f_min > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                name: "f_min",
                value: self.f_min,
            });
        }
        let approximant = spec.approximant();
        let missing = |parameter| ConfigurationError::MissingParameter {
            approximant: approximant.name().to_string(),
            domain: approximant.domain(),
            parameter,
        };
        match approximant.domain() {
            Domain::Frequency => {
                let segment_length = self
                    .segment_length
                    .ok_or_else(|| missing("a segment length"))?;
                if !(segment_length.is_finite() && segment_length > 0.0) {
                    return Err(ConfigurationError::InvalidValue {
                        name: "segment_length",
                        value: segment_length,
                    });
                }
                Ok(Plan::Frequency { segment_length })
            }
            Domain::Time => {
                let min_rate = self.sample_rate.ok_or_else(|| missing("a sample rate"))?;
                if !(min_rate.is_finite() && min_rate > 0.0) {
                    return Err(ConfigurationError::InvalidValue {
                        name: "sample_rate",
                        value: min_rate,
                    });
                }
                let max_rate = self.max_sample_rate.unwrap_or(min_rate);
                if !(max_rate.is_finite() && max_rate > 0.0) {
                    return Err(ConfigurationError::InvalidValue {
                        name: "max_sample_rate",
                        value: max_rate,
                    });
                }
                if max_rate < min_rate {
                    return Err(ConfigurationError::SampleRateCeiling {
                        min: min_rate,
                        max: max_rate,
                    });
                }
                let nyquist = min_rate / 2.0;
                if self.f_min >= nyquist {
                    return Err(ConfigurationError::AboveNyquist {
                        f_min: self.f_min,
                        nyquist,
                    });
                }
                Ok(Plan::Time { min_rate, max_rate })
            }
        }
    }

    pub fn estimate<P>(&self, provider: &P, spec: &WaveformSpec) -> Result<FinalFreq, EstimateError>
    where
        P: WaveformProvider + ?Sized,
    {
        match self.validate(spec)? {
            Plan::Frequency { segment_length } => {
                self.frequency_domain(provider, spec, segment_length)
            }
            Plan::Time { min_rate, max_rate } => {
                self.time_domain(provider, spec, min_rate, max_rate)
            }
        }
    }

    fn frequency_domain<P>(
        &self,
        provider: &P,
        spec: &WaveformSpec,
        segment_length: f64,
    ) -> Result<FinalFreq, EstimateError>
    where
        P: WaveformProvider + ?Sized,
    {
        let request = GenerationRequest::frequency_domain(spec, segment_length, self.f_min);
        let WaveformPair::Frequency { plus, .. } = provider.generate(&request)? else {
            return Err(GenerationError::Malformed(
                "expected a frequency series from a frequency-domain approximant".to_string(),
            )
            .into());
        };

        let last = plus.last_nonzero_bin().ok_or(GenerationError::Empty)?;
        let f_final = plus.delta_f() * last as f64;
        log::debug!("{}: last non-zero bin {last} of {}", spec.approximant(), plus.len());
        Ok(FinalFreq {
            f_final,
            duration: None,
            sample_rate: None,
        })
    }

    fn time_domain<P>(
        &self,
        provider: &P,
        spec: &WaveformSpec,
        min_rate: f64,
        max_rate: f64,
    ) -> Result<FinalFreq, EstimateError>
    where
        P: WaveformProvider + ?Sized,
    {
        let mut rate = min_rate;
        let mut attempts = Vec::new();
        let (mut plus, mut cross) = loop {
            attempts.push(rate);
            let request = GenerationRequest::time_domain(spec, rate, self.f_min);
            let generated = provider.generate(&request).and_then(|pair| match pair {
                WaveformPair::Time { plus, cross } => Ok((plus, cross)),
                WaveformPair::Frequency { .. } => Err(GenerationError::Malformed(
                    "expected a time series from a time-domain approximant".to_string(),
                )),
            });
            match generated {
                Ok(pair) => break pair,
                Err(err) if err.is_retryable() => {
                    log::warn!("Generation failed at {rate} Hz: {err}");
                    rate *= 2.0;
                    if rate > max_rate {
                        return Err(GenerationError::Exhausted {
                            attempts,
                            last: Box::new(err),
                        }
                        .into());
                    }
                }
                Err(err) => return Err(err.into()),
            }
        };

        let kept = series::trim_trailing_zeros(&mut plus, &mut cross);
        if kept < 2 {
            return Err(GenerationError::Empty.into());
        }
        let f_final = provider
            .instantaneous_frequency(&plus, &cross)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        let duration = plus.duration();
        log::debug!(
            "{}: {kept} samples kept at {rate} Hz after {} attempt(s)",
            spec.approximant(),
            attempts.len()
        );
        Ok(FinalFreq {
            f_final,
            duration: Some(duration),
            sample_rate: Some(rate),
        })
    }

    /// Estimate every spec in order. The first failure aborts the whole batch
    /// and no results are returned.
    pub fn run_batch<P>(
        &self,
        provider: &P,
        specs: &[WaveformSpec],
    ) -> Result<Vec<FinalFreq>, EstimateError>
    where
        P: WaveformProvider + ?Sized,
    {
        let pb = if self.progress {
            ProgressBar::new(specs.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40.green} [{elapsed_precise}] {pos}/{len} {msg}")
        {
            pb.set_style(style);
        }

        let mut results = Vec::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            let result = match self.estimate(provider, spec) {
                Ok(result) => result,
                Err(err) => {
                    pb.abandon_with_message(format!("failed on template {idx}"));
                    log::error!("Template {idx} ({}) failed: {err}", spec.approximant());
                    return Err(err);
                }
            };
            log::debug!("Template {idx}: {result:?}");
            results.push(result);
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(results)
    }
}

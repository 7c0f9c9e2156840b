pub mod approximants;
pub mod batch;
pub mod single;

use std::path::PathBuf;

use clap::Args;
use libffinal::{provider::ExternalProvider, FinalFreqOptions, PnOrders};

use crate::file::ValidPathBuf;

/// Post-Newtonian orders passed through to the provider
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// PN order of the phase, -1 for the highest available
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub phase_order: i32,

    /// PN order of spin effects, -1 for the highest available
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub spin_order: i32,

    /// PN order of tidal effects, -1 for the highest available
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub tidal_order: i32,

    /// PN order of the amplitude, -1 for the highest available
    #[clap(long, default_value_t = -1, allow_hyphen_values = true)]
    pub amplitude_order: i32,
}

impl OrderArgs {
    pub fn orders(&self) -> PnOrders {
        PnOrders {
            phase: self.phase_order,
            spin: self.spin_order,
            tidal: self.tidal_order,
            amplitude: self.amplitude_order,
        }
    }
}

#[derive(Args, Debug)]
pub struct SamplingArgs {
    /// Starting sample rate (Hz), required for time-domain approximants
    #[clap(long)]
    pub sample_rate: Option<f64>,

    /// If generation fails, the sample rate is doubled and generation retried
    /// until it passes this value. Defaults to --sample-rate, so no retries
    #[clap(long, requires = "sample_rate")]
    pub max_sample_rate: Option<f64>,

    /// Segment length (s) setting the frequency resolution, required for
    /// frequency-domain approximants
    #[clap(long)]
    pub segment_length: Option<f64>,
}

impl SamplingArgs {
    pub fn options(&self, f_min: f64) -> FinalFreqOptions {
        let mut options = FinalFreqOptions::new(f_min);
        if let Some(rate) = self.sample_rate {
            options.sample_rate(rate);
        }
        if let Some(rate) = self.max_sample_rate {
            options.max_sample_rate(rate);
        }
        if let Some(length) = self.segment_length {
            options.segment_length(length);
        }
        options
    }
}

#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Waveform generator executable, if not specified will look for
    /// ffinal-waveform in $PATH
    #[clap(long)]
    pub provider: Option<ValidPathBuf>,

    /// Extra argument appended to every provider invocation, may be repeated
    #[clap(long = "provider-arg", allow_hyphen_values = true)]
    pub provider_args: Vec<String>,
}

impl ProviderArgs {
    pub fn provider(&self) -> eyre::Result<ExternalProvider> {
        let program: Option<PathBuf> = self.provider.as_ref().map(|p| p.0.clone());
        let mut provider = ExternalProvider::find(&program)?;
        provider.extra_args(&self.provider_args);
        log::debug!("Using waveform provider {:?}", provider.program());
        Ok(provider)
    }
}

use std::{io::Write, path::PathBuf};

use clap::Parser;
use libffinal::{utils, Approximant, BinaryParams, WaveformSpec};

use super::{OrderArgs, ProviderArgs, SamplingArgs};

#[derive(Parser, Debug)]
pub struct SingleCmd {
    /// Waveform approximant, see `ffinal approximants`
    #[clap(short, long)]
    pub approximant: Approximant,

    /// Mass of the first component (solar masses)
    #[clap(long)]
    pub mass1: f64,

    /// Mass of the second component (solar masses)
    #[clap(long)]
    pub mass2: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin1x: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin1y: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin1z: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin2x: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin2y: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub spin2z: f64,

    /// Tidal deformability of the first component
    #[clap(long, default_value_t = 0.0)]
    pub lambda1: f64,

    /// Tidal deformability of the second component
    #[clap(long, default_value_t = 0.0)]
    pub lambda2: f64,

    /// Starting frequency of the waveform (Hz)
    #[clap(long)]
    pub f_lower: f64,

    /// Low-frequency cutoff (Hz), defaults to --f-lower
    #[clap(long)]
    pub f_min: Option<f64>,

    #[clap(flatten)]
    pub orders: OrderArgs,

    #[clap(flatten)]
    pub sampling: SamplingArgs,

    #[clap(flatten)]
    pub provider: ProviderArgs,

    /// Write the report here instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl SingleCmd {
    pub fn run(self) -> eyre::Result<()> {
        let params = BinaryParams {
            mass1: self.mass1,
            mass2: self.mass2,
            spin1: [self.spin1x, self.spin1y, self.spin1z],
            spin2: [self.spin2x, self.spin2y, self.spin2z],
            lambda1: self.lambda1,
            lambda2: self.lambda2,
            f_lower: self.f_lower,
        };
        let spec = WaveformSpec::try_new(self.approximant, params, self.orders.orders())?;
        let f_min = self.f_min.unwrap_or(self.f_lower);
        let options = self.sampling.options(f_min);
        options.validate(&spec)?;
        log::info!("Estimating f_final for {spec:?} from {} Hz", options.f_min());

        let provider = self.provider.provider()?;
        let result = options.estimate(&provider, &spec)?;

        let mut writer = utils::stdout_or_file(self.output.as_ref())?;
        writeln!(writer, "f Final: {} Hz", result.f_final)?;
        if let Some(duration) = result.duration {
            writeln!(writer, "Duration: {duration} s")?;
        }
        writer.flush()?;
        Ok(())
    }
}

use std::path::PathBuf;

use clap::Parser;
use libffinal::{
    bank::{self, BankOptions},
    Approximant,
};

use super::{OrderArgs, ProviderArgs, SamplingArgs};
use crate::file::ValidPathBuf;

#[derive(Parser, Debug)]
pub struct BatchCmd {
    /// Template bank, .arrow/.feather/.ipc or .csv/.tsv
    #[clap(short, long)]
    pub input: ValidPathBuf,

    /// Annotated bank with f_final and template_duration filled in, format is
    /// picked from the extension. Only written if every template succeeds
    #[clap(short, long)]
    pub output: PathBuf,

    /// Waveform approximant used for every template, see `ffinal approximants`
    #[clap(short, long)]
    pub approximant: Approximant,

    /// Low-frequency cutoff (Hz) shared by every template
    #[clap(long)]
    pub f_min: f64,

    /// Starting frequency (Hz) for templates without an f_lower column value
    #[clap(long)]
    pub f_lower: Option<f64>,

    #[clap(flatten)]
    pub orders: OrderArgs,

    #[clap(flatten)]
    pub sampling: SamplingArgs,

    #[clap(flatten)]
    pub provider: ProviderArgs,

    /// Hide the progress bar
    #[clap(long, default_value_t = false)]
    pub no_progress: bool,
}

impl BatchCmd {
    pub fn run(self) -> eyre::Result<()> {
        let records = bank::read_bank(&self.input)?;

        let mut bank_options = BankOptions::new(self.approximant);
        bank_options.orders(self.orders.orders());
        if let Some(f_lower) = self.f_lower {
            bank_options.f_lower(f_lower);
        }

        let mut options = self.sampling.options(self.f_min);
        options.progress(!self.no_progress);

        let provider = self.provider.provider()?;
        let annotated = bank_options.annotate(&options, &provider, &records)?;
        bank::write_bank(&self.output, &annotated)?;
        Ok(())
    }
}

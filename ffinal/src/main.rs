mod cmd;
mod file;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use eyre::Result;
use human_panic::setup_panic;
#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about=None)]
/// Terminal frequency and duration of compact-binary waveform templates.
struct Args {
    #[clap(flatten)]
    verbose: Verbosity,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one waveform and print its terminal frequency, plus its
    /// duration for time-domain approximants
    Single(cmd::single::SingleCmd),

    /// Fill in f_final and template_duration for every template in a bank
    ///
    /// Templates are processed in order. The first failure aborts the run and
    /// no output bank is written.
    Batch(cmd::batch::BatchCmd),

    /// List known approximants and whether they are time- or
    /// frequency-domain
    Approximants,
}

fn main() -> Result<()> {
    setup_panic!();
    jane_eyre::install()?;

    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Commands::Single(cmd) => cmd.run()?,
        Commands::Batch(cmd) => cmd.run()?,
        Commands::Approximants => cmd::approximants::run()?,
    }
    Ok(())
}

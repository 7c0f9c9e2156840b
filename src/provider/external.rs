//! Provider that runs a waveform generator executable and reads the
//! polarizations back from its tab-separated stdout.
//!
//! The executable receives the waveform parameters as `--name value` flags
//! followed by either `--delta-t` or `--delta-f`. It must print a header row
//! and then one row per sample: `hplus hcross` for time-domain approximants,
//! `hplus_re hplus_im hcross_re hcross_im` for frequency-domain ones. A
//! non-zero exit status means the parameters were rejected.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use num_complex::Complex64;
use serde::Deserialize;

use super::{GenerationRequest, Sampling, WaveformProvider};
use crate::{
    error::GenerationError,
    series::{FrequencySeries, TimeSeries, WaveformPair},
    utils,
};

/// Executable looked up on `$PATH` when no explicit path is given.
pub const DEFAULT_PROGRAM: &str = "ffinal-waveform";

#[derive(Debug, Deserialize)]
struct TimeRow {
    hplus: f64,
    hcross: f64,
}

#[derive(Debug, Deserialize)]
struct FrequencyRow {
    hplus_re: f64,
    hplus_im: f64,
    hcross_re: f64,
    hcross_im: f64,
}

#[derive(Debug, Clone)]
pub struct ExternalProvider {
    program: PathBuf,
    extra_args: Vec<OsString>,
}

impl ExternalProvider {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Use `program` if given, otherwise find [DEFAULT_PROGRAM] on `$PATH`.
    pub fn find(program: &Option<PathBuf>) -> eyre::Result<Self> {
        let program = utils::find_binary(DEFAULT_PROGRAM, program)?;
        log::debug!("Using waveform provider {program:?}");
        Ok(Self::new(program))
    }

    /// Arguments appended after the generated ones, e.g. a config file for a
    /// wrapper script.
    pub fn extra_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, request: &GenerationRequest<'_>) -> Command {
        let spec = request.spec();
        let params = spec.params();
        let orders = spec.orders();

        let mut cmd = Command::new(&self.program);
        cmd.arg("--approximant").arg(spec.approximant().name());
        for (flag, value) in [
            ("--mass1", params.mass1),
            ("--mass2", params.mass2),
            ("--spin1x", params.spin1[0]),
            ("--spin1y", params.spin1[1]),
            ("--spin1z", params.spin1[2]),
            ("--spin2x", params.spin2[0]),
            ("--spin2y", params.spin2[1]),
            ("--spin2z", params.spin2[2]),
            ("--lambda1", params.lambda1),
            ("--lambda2", params.lambda2),
        ] {
            cmd.arg(flag).arg(value.to_string());
        }
        for (flag, value) in [
            ("--phase-order", orders.phase),
            ("--spin-order", orders.spin),
            ("--tidal-order", orders.tidal),
            ("--amplitude-order", orders.amplitude),
        ] {
            cmd.arg(flag).arg(value.to_string());
        }
        cmd.arg("--f-lower").arg(params.f_lower.to_string());
        cmd.arg("--f-min").arg(request.f_min().to_string());
        match request.sampling() {
            Sampling::DeltaT(dt) => cmd.arg("--delta-t").arg(dt.to_string()),
            Sampling::DeltaF(df) => cmd.arg("--delta-f").arg(df.to_string()),
        };
        cmd.args(&self.extra_args);
        cmd
    }
}

impl WaveformProvider for ExternalProvider {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<WaveformPair, GenerationError> {
        let mut cmd = self.command(request);
        log::trace!("provider cmd: {cmd:?}");
        let output = cmd.output().map_err(|source| GenerationError::Unavailable {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationError::Rejected(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )));
        }

        match request.sampling() {
            Sampling::DeltaT(delta_t) => parse_time_domain(&output.stdout, delta_t),
            Sampling::DeltaF(delta_f) => parse_frequency_domain(&output.stdout, delta_f),
        }
    }
}

fn reader(stdout: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(stdout)
}

fn malformed(err: csv::Error) -> GenerationError {
    GenerationError::Malformed(err.to_string())
}

pub(crate) fn parse_time_domain(
    stdout: &[u8],
    delta_t: f64,
) -> Result<WaveformPair, GenerationError> {
    let mut hp = Vec::new();
    let mut hc = Vec::new();
    for row in reader(stdout).deserialize() {
        let row: TimeRow = row.map_err(malformed)?;
        hp.push(row.hplus);
        hc.push(row.hcross);
    }
    WaveformPair::time(TimeSeries::new(hp, delta_t), TimeSeries::new(hc, delta_t))
}

pub(crate) fn parse_frequency_domain(
    stdout: &[u8],
    delta_f: f64,
) -> Result<WaveformPair, GenerationError> {
    let mut hp = Vec::new();
    let mut hc = Vec::new();
    for row in reader(stdout).deserialize() {
        let row: FrequencyRow = row.map_err(malformed)?;
        hp.push(Complex64::new(row.hplus_re, row.hplus_im));
        hc.push(Complex64::new(row.hcross_re, row.hcross_im));
    }
    WaveformPair::frequency(
        FrequencySeries::new(hp, delta_f),
        FrequencySeries::new(hc, delta_f),
    )
}

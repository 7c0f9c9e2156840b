//! Template banks: reading, annotating with terminal frequencies, writing.
//!
//! Banks are stored either as Arrow IPC files (one struct column of
//! [TemplateRecord]) or as delimited text with a header row. The format is
//! picked from the file extension.

pub mod arrow_utils;
pub mod record;

use std::{
    fs::File,
    io::{BufReader, Read, Seek, Write},
    path::Path,
};

use eyre::{Result, WrapErr};
use itertools::{Itertools, MinMaxResult};
use tempfile::NamedTempFile;

use self::arrow_utils::{load_apply, SchemaExt};
pub use self::record::TemplateRecord;
use crate::{
    approximant::Approximant,
    estimate::FinalFreqOptions,
    provider::WaveformProvider,
    waveform::{PnOrders, WaveformSpec},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Arrow,
    Delimited(u8),
}

impl BankFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("arrow") | Some("feather") | Some("ipc") => Ok(BankFormat::Arrow),
            Some("csv") => Ok(BankFormat::Delimited(b',')),
            Some("tsv") | Some("txt") => Ok(BankFormat::Delimited(b'\t')),
            _ => Err(eyre::eyre!(
                "Failed to detect bank format of {path:?}, expected .arrow, .feather, .ipc, .csv or .tsv"
            )),
        }
    }
}

pub fn read_records<R>(reader: R, format: BankFormat) -> Result<Vec<TemplateRecord>>
where
    R: Read + Seek,
{
    let mut records = Vec::new();
    match format {
        BankFormat::Arrow => {
            load_apply(reader, |mut chunk: Vec<TemplateRecord>| {
                records.append(&mut chunk);
                Ok(())
            })?;
        }
        BankFormat::Delimited(delimiter) => {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .trim(csv::Trim::All)
                .from_reader(reader);
            for (idx, rec) in reader.deserialize().enumerate() {
                let rec: TemplateRecord = rec.wrap_err_with(|| format!("Bad template row {idx}"))?;
                records.push(rec);
            }
        }
    }
    Ok(records)
}

pub fn write_records<W>(writer: W, format: BankFormat, records: &[TemplateRecord]) -> Result<W>
where
    W: Write,
{
    match format {
        BankFormat::Arrow => {
            let mut writer = TemplateRecord::wrap_writer(writer)?;
            writer.save(records)?;
            writer.finish()
        }
        BankFormat::Delimited(delimiter) => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(writer);
            for rec in records {
                writer.serialize(rec)?;
            }
            writer.flush()?;
            writer
                .into_inner()
                .map_err(|e| eyre::eyre!("Failed to flush template bank: {}", e.error()))
        }
    }
}

pub fn read_bank<P: AsRef<Path>>(path: P) -> Result<Vec<TemplateRecord>> {
    let path = path.as_ref();
    let format = BankFormat::from_path(path)?;
    let file = File::open(path).wrap_err_with(|| format!("Failed to open bank {path:?}"))?;
    let records = read_records(BufReader::new(file), format)?;
    log::info!("Read {} templates from {path:?}", records.len());
    Ok(records)
}

/// Writes the bank next to its destination first and renames it into place,
/// so a failure never leaves a partial file at `path`.
pub fn write_bank<P: AsRef<Path>>(path: P, records: &[TemplateRecord]) -> Result<()> {
    let path = path.as_ref();
    let format = BankFormat::from_path(path)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write_records(tmp.as_file_mut(), format, records)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .wrap_err_with(|| format!("Failed to write bank {path:?}"))?;
    log::info!("Wrote {} templates to {path:?}", records.len());
    Ok(())
}

/// Settings shared by every row of a bank.
#[derive(Debug, Clone)]
pub struct BankOptions {
    approximant: Approximant,
    orders: PnOrders,
    f_lower: Option<f64>,
}

impl BankOptions {
    pub fn new(approximant: Approximant) -> Self {
        Self {
            approximant,
            orders: PnOrders::default(),
            f_lower: None,
        }
    }

    pub fn orders(&mut self, orders: PnOrders) -> &mut Self {
        self.orders = orders;
        self
    }

    /// Starting frequency for rows that do not carry their own.
    pub fn f_lower(&mut self, f_lower: f64) -> &mut Self {
        self.f_lower = Some(f_lower);
        self
    }

    /// Returns a new bank, index-aligned with `records`, with `f_final` and
    /// `template_duration` filled in. Every row is validated before any
    /// waveform is generated.
    pub fn annotate<P>(
        &self,
        estimator: &FinalFreqOptions,
        provider: &P,
        records: &[TemplateRecord],
    ) -> Result<Vec<TemplateRecord>>
    where
        P: WaveformProvider + ?Sized,
    {
        let specs = records
            .iter()
            .enumerate()
            .map(|(idx, rec)| {
                rec.to_spec(&self.approximant, self.orders, self.f_lower)
                    .and_then(|spec| estimator.validate(&spec).map(|_| spec))
                    .wrap_err_with(|| format!("Invalid template {idx}"))
            })
            .collect::<Result<Vec<WaveformSpec>>>()?;

        let results = estimator.run_batch(provider, &specs)?;
        match results.iter().map(|r| r.f_final).minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => log::info!("Empty bank, nothing to do"),
            MinMaxResult::OneElement(f) => log::info!("f_final: {f} Hz"),
            MinMaxResult::MinMax(lo, hi) => {
                log::info!("f_final ranges from {lo} Hz to {hi} Hz over {} templates", results.len())
            }
        }

        Ok(records
            .iter()
            .zip(results.iter())
            .map(|(rec, result)| rec.with_result(result))
            .collect())
    }
}

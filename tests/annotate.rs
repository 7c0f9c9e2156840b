use std::{cell::Cell, f64::consts::PI};

use assert_fs::{prelude::*, TempDir};
use eyre::Result;
use float_eq::assert_float_eq;
use libffinal::{
    bank::{self, BankOptions, TemplateRecord},
    provider::{GenerationRequest, Sampling, WaveformProvider},
    series::{TimeSeries, WaveformPair},
    FinalFreqOptions, GenerationError,
};

/// Tone whose frequency is the total mass in Hz, so every template gets a
/// distinct, known f_final. Fails once `fail_after` waveforms were generated.
struct MassTone {
    generated: Cell<usize>,
    fail_after: usize,
}

impl MassTone {
    fn new(fail_after: usize) -> Self {
        Self {
            generated: Cell::new(0),
            fail_after,
        }
    }
}

impl WaveformProvider for MassTone {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<WaveformPair, GenerationError> {
        if self.generated.get() >= self.fail_after {
            return Err(GenerationError::Rejected("out of range".to_string()));
        }
        self.generated.set(self.generated.get() + 1);

        let Sampling::DeltaT(dt) = request.sampling() else {
            return Err(GenerationError::Malformed("time-domain only".to_string()));
        };
        let params = request.spec().params();
        let f = params.mass1 + params.mass2;
        let n = 256;
        let hp = (0..n).map(|i| (2.0 * PI * f * i as f64 * dt).cos()).collect();
        let hc = (0..n).map(|i| (2.0 * PI * f * i as f64 * dt).sin()).collect();
        WaveformPair::time(TimeSeries::new(hp, dt), TimeSeries::new(hc, dt))
    }
}

fn input_bank() -> Vec<TemplateRecord> {
    vec![
        TemplateRecord::new(10.0, 10.0),
        TemplateRecord {
            f_lower: Some(40.0),
            ..TemplateRecord::new(50.0, 25.0)
        },
        TemplateRecord::new(1.4, 1.3),
    ]
}

fn options() -> (BankOptions, FinalFreqOptions) {
    let mut bank_options = BankOptions::new("TaylorT4".parse().unwrap());
    bank_options.f_lower(20.0);
    let mut estimator = FinalFreqOptions::new(15.0);
    estimator.sample_rate(2048.0);
    (bank_options, estimator)
}

#[test]
fn test_annotate_in_order() -> Result<()> {
    let (bank_options, estimator) = options();
    let provider = MassTone::new(usize::MAX);
    let records = input_bank();
    let annotated = bank_options.annotate(&estimator, &provider, &records)?;

    assert_eq!(annotated.len(), records.len());
    for (input, output) in records.iter().zip(&annotated) {
        assert_eq!(input.mass1, output.mass1);
        assert_float_eq!(
            output.f_final.unwrap(),
            input.mass1 + input.mass2,
            abs <= 1e-6
        );
        assert_float_eq!(output.template_duration.unwrap(), 256.0 / 2048.0, ulps <= 1);
    }
    Ok(())
}

#[test]
fn test_invalid_template_fails_before_generation() {
    let (bank_options, estimator) = options();
    let provider = MassTone::new(usize::MAX);
    let mut records = input_bank();
    records[2].mass2 = -1.0;

    let err = bank_options
        .annotate(&estimator, &provider, &records)
        .unwrap_err();
    assert!(format!("{err:?}").contains("mass2"), "{err:?}");
    assert_eq!(provider.generated.get(), 0);
}

#[test]
fn test_failed_batch_leaves_no_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.child("bank.arrow");
    let output = temp_dir.child("annotated.arrow");
    bank::write_bank(input.path(), &input_bank())?;

    let (bank_options, estimator) = options();
    let provider = MassTone::new(2);
    let records = bank::read_bank(input.path())?;
    let result = bank_options
        .annotate(&estimator, &provider, &records)
        .and_then(|annotated| bank::write_bank(output.path(), &annotated));

    assert!(result.is_err());
    output.assert(predicates::path::missing());
    Ok(())
}

#[test]
fn test_arrow_bank_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.child("annotated.feather");

    let (bank_options, estimator) = options();
    let provider = MassTone::new(usize::MAX);
    let annotated = bank_options.annotate(&estimator, &provider, &input_bank())?;
    bank::write_bank(output.path(), &annotated)?;

    let reloaded = bank::read_bank(output.path())?;
    pretty_assertions::assert_eq!(reloaded, annotated);
    Ok(())
}

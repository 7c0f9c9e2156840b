use std::error::Error;

use assert_cmd::Command;
use assert_fs::{fixture::ChildPath, prelude::*, TempDir};
use predicates::prelude::*;

/// Provider script emitting a 100 Hz circular tone of 100 samples followed by
/// 10 samples of zero padding. Rejects sample rates below `min_rate`.
#[cfg(unix)]
fn tone_provider(temp_dir: &TempDir, min_rate: u32) -> Result<ChildPath, Box<dyn Error>> {
    use std::{fs, os::unix::fs::PermissionsExt};

    let script = temp_dir.child("tone-provider");
    script.write_str(&format!(
        r#"#!/bin/sh
dt=""
df=""
while [ $# -gt 0 ]; do
    case "$1" in
        --delta-t) dt="$2"; shift ;;
        --delta-f) df="$2"; shift ;;
    esac
    shift
done
if [ -n "$df" ]; then
    awk 'BEGIN {{
        printf "hplus_re\thplus_im\thcross_re\thcross_im\n";
        for (i = 0; i < 64; i++) {{
            if (i > 0 && i <= 40) printf "1\t0\t0\t1\n"; else printf "0\t0\t0\t0\n";
        }}
    }}'
    exit 0
fi
awk -v dt="$dt" -v min_rate={min_rate} 'BEGIN {{
    if (1.0 / dt < min_rate) {{ print "sample rate too low" > "/dev/stderr"; exit 1 }}
    pi = 3.141592653589793;
    printf "hplus\thcross\n";
    for (i = 0; i < 100; i++) printf "%.17g\t%.17g\n", cos(2 * pi * 100 * i * dt), sin(2 * pi * 100 * i * dt);
    for (i = 0; i < 10; i++) printf "0\t0\n";
}}'
"#
    ))?;
    let mut perms = fs::metadata(script.path())?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(script.path(), perms)?;
    Ok(script)
}

#[test]
fn test_nyquist_violation() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let never_run = temp_dir.child("missing-provider");
    never_run.touch()?;

    Command::cargo_bin("ffinal")?
        .arg("single")
        .args(["-a", "SEOBNRv4", "--mass1", "10", "--mass2", "10"])
        .args(["--f-lower", "200", "--sample-rate", "300"])
        .arg("--provider")
        .arg(never_run.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nyquist"));
    Ok(())
}

#[test]
fn test_non_finite_max_sample_rate() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let never_run = temp_dir.child("missing-provider");
    never_run.touch()?;

    for max_rate in ["nan", "inf"] {
        Command::cargo_bin("ffinal")?
            .arg("single")
            .args(["-a", "SEOBNRv4", "--mass1", "10", "--mass2", "10"])
            .args(["--f-lower", "20", "--sample-rate", "256"])
            .args(["--max-sample-rate", max_rate])
            .arg("--provider")
            .arg(never_run.path())
            .timeout(std::time::Duration::from_secs(30))
            .assert()
            .failure()
            .stderr(predicate::str::contains("max_sample_rate"));
    }
    Ok(())
}

#[test]
fn test_unknown_approximant() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("ffinal")?
        .arg("single")
        .args(["-a", "NotAnApproximant", "--mass1", "10", "--mass2", "10"])
        .args(["--f-lower", "20", "--sample-rate", "4096"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized approximant"));
    Ok(())
}

#[test]
fn test_list_approximants() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("ffinal")?
        .arg("approximants")
        .assert()
        .success()
        .stdout(predicate::str::contains("TaylorF2\tfrequency-domain"))
        .stdout(predicate::str::contains("SEOBNRv4\ttime-domain"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_single_time_domain() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = tone_provider(&temp_dir, 1000)?;

    Command::cargo_bin("ffinal")?
        .arg("single")
        .args(["-a", "SEOBNRv4", "--mass1", "10", "--mass2", "10"])
        .args(["--f-lower", "20", "--sample-rate", "256", "--max-sample-rate", "4096"])
        .arg("--provider")
        .arg(provider.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("f Final: "))
        .stdout(predicate::str::contains("Duration: 0.09765625 s"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_single_retries_exhausted() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = tone_provider(&temp_dir, 1000)?;

    Command::cargo_bin("ffinal")?
        .arg("single")
        .args(["-a", "TaylorT4", "--mass1", "1.4", "--mass2", "1.4"])
        .args(["--f-lower", "20", "--sample-rate", "256", "--max-sample-rate", "512"])
        .arg("--provider")
        .arg(provider.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("try increasing max sample rate"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_single_frequency_domain() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = tone_provider(&temp_dir, 0)?;

    Command::cargo_bin("ffinal")?
        .arg("single")
        .args(["-a", "TaylorF2", "--mass1", "1.4", "--mass2", "1.4"])
        .args(["--f-lower", "20", "--segment-length", "4"])
        .arg("--provider")
        .arg(provider.path())
        .assert()
        .success()
        .stdout("f Final: 10 Hz\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_batch() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = tone_provider(&temp_dir, 0)?;
    let input = temp_dir.child("bank.csv");
    input.write_str("mass1,mass2,spin1z,f_lower\n10,10,0.1,20\n30,5,-0.3,\n")?;
    let output = temp_dir.child("out.csv");

    Command::cargo_bin("ffinal")?
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["-a", "SEOBNRv4", "--f-min", "15", "--f-lower", "25"])
        .args(["--sample-rate", "4096", "--no-progress"])
        .arg("--provider")
        .arg(provider.path())
        .assert()
        .success();

    output.assert(predicate::str::contains("template_duration"));
    output.assert(predicate::str::contains(",0.0244140625\n"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_batch_failure_writes_nothing() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = tone_provider(&temp_dir, 8192)?;
    let input = temp_dir.child("bank.csv");
    input.write_str("mass1,mass2,f_lower\n10,10,20\n")?;
    let output = temp_dir.child("out.arrow");

    Command::cargo_bin("ffinal")?
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["-a", "TaylorT4", "--f-min", "15"])
        .args(["--sample-rate", "1024", "--max-sample-rate", "4096", "--no-progress"])
        .arg("--provider")
        .arg(provider.path())
        .assert()
        .failure();

    output.assert(predicate::path::missing());
    Ok(())
}

//! Instantaneous frequency of a waveform from its two polarizations.

use std::f64::consts::PI;

use crate::series::TimeSeries;

/// Maps a phase step onto `[-π, π)`, keeping `+π` for positive steps that
/// land exactly on the branch cut.
fn wrap_step(step: f64) -> f64 {
    let wrapped = (step + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI && step > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Continuous phase of `atan2(cross, plus)`, starting at zero.
pub fn phase_from_polarizations(plus: &TimeSeries, cross: &TimeSeries) -> Vec<f64> {
    let raw: Vec<f64> = plus
        .data()
        .iter()
        .zip(cross.data())
        .map(|(p, c)| c.atan2(*p))
        .collect();

    let mut phase = Vec::with_capacity(raw.len());
    let mut acc = 0.0;
    for (i, x) in raw.iter().enumerate() {
        if i > 0 {
            acc += wrap_step(x - raw[i - 1]);
        }
        phase.push(acc);
    }
    phase
}

/// Forward-difference frequency in Hz, one value per adjacent sample pair.
pub fn frequency_from_polarizations(plus: &TimeSeries, cross: &TimeSeries) -> Vec<f64> {
    let delta_t = plus.delta_t();
    phase_from_polarizations(plus, cross)
        .windows(2)
        .map(|w| (w[1] - w[0]) / (2.0 * PI * delta_t))
        .collect()
}

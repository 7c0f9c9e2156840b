use arrow2_convert::{ArrowDeserialize, ArrowField, ArrowSerialize};
use serde::{Deserialize, Serialize};

use super::arrow_utils::SchemaExt;
use crate::{
    approximant::Approximant,
    error::ConfigurationError,
    estimate::FinalFreq,
    waveform::{BinaryParams, PnOrders, WaveformSpec},
};

/// One row of a template bank. `f_final` and `template_duration` are left
/// empty on input and filled in by `ffinal batch`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    ArrowField,
    ArrowSerialize,
    ArrowDeserialize,
    Serialize,
    Deserialize,
)]
pub struct TemplateRecord {
    pub mass1: f64,
    pub mass2: f64,
    #[serde(default)]
    pub spin1x: f64,
    #[serde(default)]
    pub spin1y: f64,
    #[serde(default)]
    pub spin1z: f64,
    #[serde(default)]
    pub spin2x: f64,
    #[serde(default)]
    pub spin2y: f64,
    #[serde(default)]
    pub spin2z: f64,
    #[serde(default)]
    pub lambda1: f64,
    #[serde(default)]
    pub lambda2: f64,
    #[serde(default)]
    pub f_lower: Option<f64>,
    #[serde(default)]
    pub f_final: Option<f64>,
    #[serde(default)]
    pub template_duration: Option<f64>,
}

impl SchemaExt for TemplateRecord {
    fn type_as_str() -> &'static str {
        "templates"
    }
}

impl TemplateRecord {
    pub fn new(mass1: f64, mass2: f64) -> Self {
        TemplateRecord {
            mass1,
            mass2,
            ..Default::default()
        }
    }

    /// Builds the waveform for this row. Rows without their own `f_lower` use
    /// `default_f_lower`.
    pub fn to_spec(
        &self,
        approximant: &Approximant,
        orders: PnOrders,
        default_f_lower: Option<f64>,
    ) -> Result<WaveformSpec, ConfigurationError> {
        let f_lower = self.f_lower.or(default_f_lower).ok_or_else(|| {
            ConfigurationError::MissingParameter {
                approximant: approximant.name().to_string(),
                domain: approximant.domain(),
                parameter: "f_lower",
            }
        })?;
        let params = BinaryParams {
            mass1: self.mass1,
            mass2: self.mass2,
            spin1: [self.spin1x, self.spin1y, self.spin1z],
            spin2: [self.spin2x, self.spin2y, self.spin2z],
            lambda1: self.lambda1,
            lambda2: self.lambda2,
            f_lower,
        };
        WaveformSpec::try_new(approximant.clone(), params, orders)
    }

    /// Copy of this row carrying the estimator output.
    pub fn with_result(&self, result: &FinalFreq) -> Self {
        TemplateRecord {
            f_final: Some(result.f_final),
            template_duration: result.duration,
            ..self.clone()
        }
    }
}

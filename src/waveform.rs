use crate::{approximant::Approximant, error::ConfigurationError};

/// Post-Newtonian order controls handed to the provider. `-1` lets the
/// provider pick its highest available order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnOrders {
    pub phase: i32,
    pub spin: i32,
    pub tidal: i32,
    pub amplitude: i32,
}

impl Default for PnOrders {
    fn default() -> Self {
        PnOrders {
            phase: -1,
            spin: -1,
            tidal: -1,
            amplitude: -1,
        }
    }
}

/// Intrinsic parameters of a compact binary, unvalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BinaryParams {
    pub mass1: f64,
    pub mass2: f64,
    pub spin1: [f64; 3],
    pub spin2: [f64; 3],
    pub lambda1: f64,
    pub lambda2: f64,
    pub f_lower: f64,
}

/// Everything needed to ask a provider for one waveform. Validated on
/// construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSpec {
    approximant: Approximant,
    params: BinaryParams,
    orders: PnOrders,
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidValue { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidValue { name, value })
    }
}

impl WaveformSpec {
    pub fn try_new(
        approximant: Approximant,
        params: BinaryParams,
        orders: PnOrders,
    ) -> Result<Self, ConfigurationError> {
        positive("mass1", params.mass1)?;
        positive("mass2", params.mass2)?;
        positive("f_lower", params.f_lower)?;
        for (name, value) in [
            ("spin1x", params.spin1[0]),
            ("spin1y", params.spin1[1]),
            ("spin1z", params.spin1[2]),
            ("spin2x", params.spin2[0]),
            ("spin2y", params.spin2[1]),
            ("spin2z", params.spin2[2]),
        ] {
            finite(name, value)?;
        }
        for (name, value) in [("lambda1", params.lambda1), ("lambda2", params.lambda2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidValue { name, value });
            }
        }
        Ok(WaveformSpec {
            approximant,
            params,
            orders,
        })
    }

    pub fn approximant(&self) -> &Approximant {
        &self.approximant
    }

    pub fn params(&self) -> &BinaryParams {
        &self.params
    }

    pub fn orders(&self) -> PnOrders {
        self.orders
    }

    pub fn f_lower(&self) -> f64 {
        self.params.f_lower
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params() -> BinaryParams {
        BinaryParams {
            mass1: 1.4,
            mass2: 1.35,
            spin1: [0.0, 0.0, 0.05],
            lambda1: 400.0,
            lambda2: 450.0,
            f_lower: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_spec() {
        let approximant = "TaylorF2".parse().unwrap();
        let spec = WaveformSpec::try_new(approximant, params(), PnOrders::default()).unwrap();
        assert_eq!(spec.f_lower(), 30.0);
        assert_eq!(spec.orders().phase, -1);
        assert_eq!(spec.approximant().name(), "TaylorF2");
    }

    #[test]
    fn test_invalid_values() {
        let approximant: Approximant = "TaylorT4".parse().unwrap();

        let mut p = params();
        p.mass2 = 0.0;
        let err = WaveformSpec::try_new(approximant.clone(), p, PnOrders::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { name: "mass2", .. }));

        let mut p = params();
        p.spin2[1] = f64::NAN;
        let err = WaveformSpec::try_new(approximant.clone(), p, PnOrders::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { name: "spin2y", .. }));

        let mut p = params();
        p.lambda1 = -1.0;
        let err = WaveformSpec::try_new(approximant.clone(), p, PnOrders::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { name: "lambda1", .. }));

        let mut p = params();
        p.f_lower = 0.0;
        let err = WaveformSpec::try_new(approximant, p, PnOrders::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { name: "f_lower", .. }));
    }
}

//! Geometric Brownian motion.
//!
//! ```text
//! dS/S = (r − q) dt + σ dW
//! ```

use crate::{
    characteristic_function::{drift_exponent, CharacteristicFunction},
    horizon::ValuationHorizon,
    model::ModelKind,
};
use cfp_core::{ensure, errors::Result, Volatility};
use num_complex::Complex64;
use serde::Serialize;

/// Constant-volatility log-normal dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GbmParameters {
    volatility: Volatility,
}

impl GbmParameters {
    /// Create GBM parameters; the volatility must be non-negative.
    pub fn new(volatility: Volatility) -> Result<Self> {
        ensure!(
            volatility >= 0.0 && volatility.is_finite(),
            "volatility must be non-negative and finite, got {volatility}"
        );
        Ok(Self { volatility })
    }

    /// Diffusion volatility σ.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl CharacteristicFunction for GbmParameters {
    fn kind(&self) -> ModelKind {
        ModelKind::Gbm
    }

    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        let variance = self.volatility * self.volatility;
        drift_exponent(u, horizon, 0.5 * variance) - 0.5 * variance * u * u * horizon.time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic_function::test_support::{assert_martingale, assert_normalised};

    #[test]
    fn characteristic_function_properties() {
        let model = GbmParameters::new(0.2).unwrap();
        let horizon = ValuationHorizon::new(100.0, 0.01, 0.02, 1.5).unwrap();
        assert_martingale(&model, &horizon);
        assert_normalised(&model, &horizon);
    }

    #[test]
    fn matches_gaussian_moments() {
        // ln S_T ~ N(m, s²): φ(u) = exp(ium − ½s²u²)
        let model = GbmParameters::new(0.3).unwrap();
        let horizon = ValuationHorizon::new(50.0, 0.04, 0.0, 2.0).unwrap();
        let m = 50.0_f64.ln() + (0.04 - 0.045) * 2.0;
        let s2 = 0.09 * 2.0;
        let u = 1.7;
        let expected = Complex64::new(-0.5 * s2 * u * u, u * m).exp();
        let got = model.characteristic_function(Complex64::new(u, 0.0), &horizon);
        assert!((got - expected).norm() < 1e-14);
    }

    #[test]
    fn rejects_negative_volatility() {
        assert!(GbmParameters::new(-0.1).unwrap_err().is_configuration());
        assert!(GbmParameters::new(0.0).is_ok());
    }
}

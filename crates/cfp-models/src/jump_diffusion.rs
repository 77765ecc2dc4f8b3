//! Merton (1976) jump diffusion.
//!
//! ```text
//! dS/S = (r − q − λk̄) dt + σ dW + (e^J − 1) dN
//! ```
//!
//! where `N` is Poisson with intensity `λ`, the log-jump `J ~ N(μ_J, δ_J²)`
//! and `k̄ = E[e^J − 1] = exp(μ_J + ½δ_J²) − 1` compensates the drift.

use crate::{
    characteristic_function::{drift_exponent, CharacteristicFunction},
    gbm::GbmParameters,
    horizon::ValuationHorizon,
    model::ModelKind,
};
use cfp_core::{ensure, errors::Result, Real, Time, Volatility};
use num_complex::Complex64;
use serde::Serialize;

/// Compound-Poisson log-normal jumps, shared by the Merton and Bates models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpParameters {
    intensity: Real,
    mean_jump_size: Real,
    jump_volatility: Volatility,
}

impl JumpParameters {
    /// Create jump parameters.
    ///
    /// # Arguments
    /// * `intensity`: Poisson intensity λ ≥ 0 (jumps per year)
    /// * `mean_jump_size`: mean μ_J of the log-jump
    /// * `jump_volatility`: standard deviation δ_J ≥ 0 of the log-jump
    pub fn new(intensity: Real, mean_jump_size: Real, jump_volatility: Volatility) -> Result<Self> {
        ensure!(
            intensity >= 0.0 && intensity.is_finite(),
            "jump intensity must be non-negative and finite, got {intensity}"
        );
        ensure!(
            mean_jump_size.is_finite(),
            "mean jump size must be finite, got {mean_jump_size}"
        );
        ensure!(
            jump_volatility >= 0.0 && jump_volatility.is_finite(),
            "jump volatility must be non-negative and finite, got {jump_volatility}"
        );
        Ok(Self {
            intensity,
            mean_jump_size,
            jump_volatility,
        })
    }

    /// Poisson intensity λ.
    pub fn intensity(&self) -> Real {
        self.intensity
    }

    /// Mean log-jump μ_J.
    pub fn mean_jump_size(&self) -> Real {
        self.mean_jump_size
    }

    /// Log-jump standard deviation δ_J.
    pub fn jump_volatility(&self) -> Volatility {
        self.jump_volatility
    }

    /// Expected relative jump `k̄ = exp(μ_J + ½δ_J²) − 1`.
    pub fn compensator(&self) -> Real {
        (self.mean_jump_size + 0.5 * self.jump_volatility * self.jump_volatility).exp_m1()
    }

    /// Drift correction per unit time, `λ k̄`.
    pub fn drift_correction(&self) -> Real {
        self.intensity * self.compensator()
    }

    /// `λT (exp(iuμ_J − ½δ_J²u²) − 1)`, the uncompensated jump exponent.
    pub fn jump_exponent(&self, u: Complex64, time: Time) -> Complex64 {
        if self.intensity == 0.0 {
            return Complex64::new(0.0, 0.0);
        }
        let i = Complex64::i();
        let delta2 = self.jump_volatility * self.jump_volatility;
        let jump = (i * u * self.mean_jump_size - 0.5 * delta2 * u * u).exp();
        self.intensity * time * (jump - 1.0)
    }
}

/// Merton jump-diffusion parameters: a GBM diffusion plus jumps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpDiffusionParameters {
    diffusion: GbmParameters,
    jumps: JumpParameters,
}

impl JumpDiffusionParameters {
    /// Create Merton parameters from scalar inputs.
    pub fn new(
        volatility: Volatility,
        intensity: Real,
        mean_jump_size: Real,
        jump_volatility: Volatility,
    ) -> Result<Self> {
        Ok(Self {
            diffusion: GbmParameters::new(volatility)?,
            jumps: JumpParameters::new(intensity, mean_jump_size, jump_volatility)?,
        })
    }

    /// Combine already validated diffusion and jump parameters.
    pub fn from_parts(diffusion: GbmParameters, jumps: JumpParameters) -> Self {
        Self { diffusion, jumps }
    }

    /// Diffusion volatility σ.
    pub fn volatility(&self) -> Volatility {
        self.diffusion.volatility()
    }

    /// The diffusion part.
    pub fn diffusion(&self) -> &GbmParameters {
        &self.diffusion
    }

    /// The jump part.
    pub fn jumps(&self) -> &JumpParameters {
        &self.jumps
    }
}

impl CharacteristicFunction for JumpDiffusionParameters {
    fn kind(&self) -> ModelKind {
        ModelKind::JumpDiffusion
    }

    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        let variance = self.volatility() * self.volatility();
        let t = horizon.time();
        let correction = 0.5 * variance + self.jumps.drift_correction();
        drift_exponent(u, horizon, correction) - 0.5 * variance * u * u * t
            + self.jumps.jump_exponent(u, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic_function::test_support::{assert_martingale, assert_normalised};

    #[test]
    fn characteristic_function_properties() {
        let model = JumpDiffusionParameters::new(0.2, 0.8, -0.1, 0.15).unwrap();
        let horizon = ValuationHorizon::new(100.0, 0.05, 0.01, 1.0).unwrap();
        assert_martingale(&model, &horizon);
        assert_normalised(&model, &horizon);
    }

    #[test]
    fn zero_intensity_reduces_to_gbm() {
        let merton = JumpDiffusionParameters::new(0.25, 0.0, -0.2, 0.3).unwrap();
        let gbm = GbmParameters::new(0.25).unwrap();
        let horizon = ValuationHorizon::new(100.0, 0.03, 0.0, 0.75).unwrap();
        for u in [0.3, 1.0, 4.5, 12.0] {
            let u = Complex64::new(u, -2.5);
            let a = merton.characteristic_function(u, &horizon);
            let b = gbm.characteristic_function(u, &horizon);
            assert!((a - b).norm() <= 1e-14 * b.norm().max(1.0), "{a} vs {b}");
        }
    }

    #[test]
    fn compensator_value() {
        let jumps = JumpParameters::new(1.0, -0.1, 0.2).unwrap();
        assert!((jumps.compensator() - ((-0.1 + 0.02_f64).exp() - 1.0)).abs() < 1e-15);
        assert!((jumps.drift_correction() - jumps.compensator()).abs() < 1e-15);
    }

    #[test]
    fn rejects_invalid_jumps() {
        assert!(JumpParameters::new(-1.0, 0.0, 0.1).is_err());
        assert!(JumpParameters::new(1.0, 0.0, -0.1).is_err());
        assert!(JumpParameters::new(1.0, Real::NAN, 0.1).is_err());
        assert!(JumpDiffusionParameters::new(-0.2, 1.0, 0.0, 0.1).is_err());
    }
}

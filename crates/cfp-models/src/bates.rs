//! Bates (1996): Heston stochastic volatility plus Merton jumps.

use crate::{
    characteristic_function::CharacteristicFunction,
    heston::StochasticVolatilityParameters,
    horizon::ValuationHorizon,
    jump_diffusion::JumpParameters,
    model::ModelKind,
};
use num_complex::Complex64;
use serde::Serialize;

/// Bates model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticVolatilityJumpParameters {
    volatility: StochasticVolatilityParameters,
    jumps: JumpParameters,
}

impl StochasticVolatilityJumpParameters {
    /// Combine validated Heston and jump parameters.
    pub fn new(volatility: StochasticVolatilityParameters, jumps: JumpParameters) -> Self {
        Self { volatility, jumps }
    }

    /// The stochastic-volatility part.
    pub fn stochastic_volatility(&self) -> &StochasticVolatilityParameters {
        &self.volatility
    }

    /// The jump part.
    pub fn jumps(&self) -> &JumpParameters {
        &self.jumps
    }
}

impl CharacteristicFunction for StochasticVolatilityJumpParameters {
    fn kind(&self) -> ModelKind {
        ModelKind::StochasticVolatilityJump
    }

    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        let t = horizon.time();
        let compensation = Complex64::i() * u * self.jumps.drift_correction() * t;
        self.volatility.log_characteristic_function(u, horizon) + self.jumps.jump_exponent(u, t)
            - compensation
    }
}

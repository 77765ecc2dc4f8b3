//! Tagged dispatch over the four supported models.

use crate::{
    bates::StochasticVolatilityJumpParameters,
    characteristic_function::CharacteristicFunction,
    gbm::GbmParameters,
    heston::StochasticVolatilityParameters,
    horizon::ValuationHorizon,
    jump_diffusion::JumpDiffusionParameters,
};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model tag used in configuration files and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Geometric Brownian motion.
    Gbm,
    /// Merton jump diffusion.
    JumpDiffusion,
    /// Heston stochastic volatility.
    StochasticVolatility,
    /// Bates stochastic volatility with jumps.
    StochasticVolatilityJump,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Gbm => "gbm",
            ModelKind::JumpDiffusion => "jump_diffusion",
            ModelKind::StochasticVolatility => "stochastic_volatility",
            ModelKind::StochasticVolatilityJump => "stochastic_volatility_jump",
        };
        f.write_str(name)
    }
}

/// Parameters of one of the four models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ModelParameters {
    /// Geometric Brownian motion.
    Gbm(GbmParameters),
    /// Merton jump diffusion.
    JumpDiffusion(JumpDiffusionParameters),
    /// Heston stochastic volatility.
    StochasticVolatility(StochasticVolatilityParameters),
    /// Bates stochastic volatility with jumps.
    StochasticVolatilityJump(StochasticVolatilityJumpParameters),
}

impl ModelParameters {
    fn inner(&self) -> &dyn CharacteristicFunction {
        match self {
            ModelParameters::Gbm(m) => m,
            ModelParameters::JumpDiffusion(m) => m,
            ModelParameters::StochasticVolatility(m) => m,
            ModelParameters::StochasticVolatilityJump(m) => m,
        }
    }
}

impl CharacteristicFunction for ModelParameters {
    fn kind(&self) -> ModelKind {
        self.inner().kind()
    }

    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        self.inner().log_characteristic_function(u, horizon)
    }
}

impl From<GbmParameters> for ModelParameters {
    fn from(m: GbmParameters) -> Self {
        ModelParameters::Gbm(m)
    }
}

impl From<JumpDiffusionParameters> for ModelParameters {
    fn from(m: JumpDiffusionParameters) -> Self {
        ModelParameters::JumpDiffusion(m)
    }
}

impl From<StochasticVolatilityParameters> for ModelParameters {
    fn from(m: StochasticVolatilityParameters) -> Self {
        ModelParameters::StochasticVolatility(m)
    }
}

impl From<StochasticVolatilityJumpParameters> for ModelParameters {
    fn from(m: StochasticVolatilityJumpParameters) -> Self {
        ModelParameters::StochasticVolatilityJump(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_inner_model() {
        let gbm = GbmParameters::new(0.2).unwrap();
        let model = ModelParameters::from(gbm);
        assert_eq!(model.kind(), ModelKind::Gbm);
        let h = ValuationHorizon::new(100.0, 0.01, 0.0, 1.0).unwrap();
        let u = Complex64::new(2.0, -2.5);
        assert_eq!(
            model.characteristic_function(u, &h),
            gbm.characteristic_function(u, &h)
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(ModelKind::StochasticVolatilityJump.to_string(), "stochastic_volatility_jump");
        let heston = StochasticVolatilityParameters::new(0.04, 1.0, 0.04, 0.2, 0.0).unwrap();
        assert_eq!(
            ModelParameters::from(heston).kind(),
            ModelKind::StochasticVolatility
        );
    }
}

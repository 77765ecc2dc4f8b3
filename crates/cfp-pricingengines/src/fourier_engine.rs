//! Fourier-transform engines for the four models.
//!
//! [`TransformEngine`] couples one model's characteristic function with a
//! [`FourierIntegrator`]. [`FourierEngine`] is the tagged union used when the
//! model is only known at run time (configuration files, the CLI).

use cfp_core::{errors::Result, Real};
use cfp_models::{
    CharacteristicFunction, ContractParameters, GbmParameters, JumpDiffusionParameters,
    MarketParameters, ModelKind, ModelParameters, OptionType, StochasticVolatilityJumpParameters,
    StochasticVolatilityParameters, ValuationHorizon, ValuationResult,
};
use tracing::debug;

use crate::{
    fourier_integrator::{FourierIntegrator, FourierSettings, TransformPrice},
    pricer::OptionPricer,
};

/// Transform pricer for a model `M`.
#[derive(Debug, Clone)]
pub struct TransformEngine<M> {
    model: M,
    integrator: FourierIntegrator,
}

/// GBM transform engine.
pub type GbmFourierEngine = TransformEngine<GbmParameters>;
/// Merton jump-diffusion transform engine.
pub type JumpDiffusionFourierEngine = TransformEngine<JumpDiffusionParameters>;
/// Heston transform engine.
pub type StochasticVolatilityFourierEngine = TransformEngine<StochasticVolatilityParameters>;
/// Bates transform engine.
pub type StochasticVolatilityJumpFourierEngine =
    TransformEngine<StochasticVolatilityJumpParameters>;

impl<M: CharacteristicFunction> TransformEngine<M> {
    /// Create an engine with explicit settings.
    pub fn new(model: M, settings: FourierSettings) -> Result<Self> {
        Ok(Self {
            model,
            integrator: FourierIntegrator::new(settings)?,
        })
    }

    /// Create an engine with the default Carr–Madan settings.
    pub fn with_defaults(model: M) -> Self {
        Self {
            model,
            integrator: FourierIntegrator::default(),
        }
    }

    /// The model parameters.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The integrator settings.
    pub fn settings(&self) -> &FourierSettings {
        self.integrator.settings()
    }

    /// Price from already resolved scalar inputs.
    pub fn price(
        &self,
        strike: Real,
        option_type: OptionType,
        horizon: &ValuationHorizon,
    ) -> Result<TransformPrice> {
        self.integrator
            .price(&self.model, strike, option_type, horizon)
    }
}

impl<M: CharacteristicFunction> OptionPricer for TransformEngine<M> {
    fn valuation(
        &self,
        contract: &ContractParameters,
        market: &MarketParameters,
    ) -> Result<ValuationResult> {
        let horizon = ValuationHorizon::from_market(market, contract)?;
        let value = self.price(contract.strike(), contract.option_type(), &horizon)?;
        debug!(
            model = %self.model.kind(),
            option_type = %contract.option_type(),
            strike = contract.strike(),
            maturity = %contract.maturity(),
            present_value = value.price,
            "transform valuation"
        );
        Ok(ValuationResult::from_present_value(value.price)
            .with_result("evaluations", value.evaluations as Real)
            .with_result("upper_limit", value.upper_limit))
    }
}

/// Transform pricer selected by model tag.
#[derive(Debug, Clone)]
pub enum FourierEngine {
    /// Geometric Brownian motion.
    Gbm(GbmFourierEngine),
    /// Merton jump diffusion.
    JumpDiffusion(JumpDiffusionFourierEngine),
    /// Heston stochastic volatility.
    StochasticVolatility(StochasticVolatilityFourierEngine),
    /// Bates stochastic volatility with jumps.
    StochasticVolatilityJump(StochasticVolatilityJumpFourierEngine),
}

impl FourierEngine {
    /// Build the engine matching `model`.
    pub fn from_model(model: ModelParameters, settings: FourierSettings) -> Result<Self> {
        Ok(match model {
            ModelParameters::Gbm(m) => FourierEngine::Gbm(TransformEngine::new(m, settings)?),
            ModelParameters::JumpDiffusion(m) => {
                FourierEngine::JumpDiffusion(TransformEngine::new(m, settings)?)
            }
            ModelParameters::StochasticVolatility(m) => {
                FourierEngine::StochasticVolatility(TransformEngine::new(m, settings)?)
            }
            ModelParameters::StochasticVolatilityJump(m) => {
                FourierEngine::StochasticVolatilityJump(TransformEngine::new(m, settings)?)
            }
        })
    }

    /// Which model this engine prices.
    pub fn kind(&self) -> ModelKind {
        match self {
            FourierEngine::Gbm(_) => ModelKind::Gbm,
            FourierEngine::JumpDiffusion(_) => ModelKind::JumpDiffusion,
            FourierEngine::StochasticVolatility(_) => ModelKind::StochasticVolatility,
            FourierEngine::StochasticVolatilityJump(_) => ModelKind::StochasticVolatilityJump,
        }
    }

    fn pricer(&self) -> &dyn OptionPricer {
        match self {
            FourierEngine::Gbm(e) => e,
            FourierEngine::JumpDiffusion(e) => e,
            FourierEngine::StochasticVolatility(e) => e,
            FourierEngine::StochasticVolatilityJump(e) => e,
        }
    }

    /// Price from already resolved scalar inputs.
    pub fn price(
        &self,
        strike: Real,
        option_type: OptionType,
        horizon: &ValuationHorizon,
    ) -> Result<TransformPrice> {
        match self {
            FourierEngine::Gbm(e) => e.price(strike, option_type, horizon),
            FourierEngine::JumpDiffusion(e) => e.price(strike, option_type, horizon),
            FourierEngine::StochasticVolatility(e) => e.price(strike, option_type, horizon),
            FourierEngine::StochasticVolatilityJump(e) => e.price(strike, option_type, horizon),
        }
    }
}

impl OptionPricer for FourierEngine {
    fn valuation(
        &self,
        contract: &ContractParameters,
        market: &MarketParameters,
    ) -> Result<ValuationResult> {
        self.pricer().valuation(contract, market)
    }
}

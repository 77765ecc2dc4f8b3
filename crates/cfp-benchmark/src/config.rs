//! TOML experiment configuration.
//!
//! The file is read into plain `serde` structs and then passed through the
//! validating constructors; a rejected value is reported as
//! [`Error::Config`] naming its section.
//!
//! ```toml
//! [market]
//! spot = 100.0
//! rate = 0.01
//! pricing_date = "2015-01-01"
//!
//! [model]
//! kind = "gbm"
//! volatility = 0.2
//!
//! [contract]
//! option_type = "call"
//! strike = 100.0
//! maturity = "2015-03-31"
//!
//! [grid]
//! maturities = ["2015-03-31", "2015-06-30"]
//! strike_ratios = [0.9, 1.0, 1.1]
//! ```

use std::path::Path;

use cfp_core::{
    errors::{Error, Result},
    Real, Size,
};
use cfp_math::SemiInfiniteIntegral;
use cfp_methods::MonteCarloSettings;
use cfp_models::{
    ContractParameters, DayCounter, GbmParameters, JumpDiffusionParameters, JumpParameters,
    MarketParameters, ModelParameters, NaiveDate, OptionType, StochasticVolatilityJumpParameters,
    StochasticVolatilityParameters,
};
use cfp_pricingengines::{FourierSettings, Quadrature, TransformMethod, DEFAULT_DAMPING};
use serde::Deserialize;

use crate::harness::BenchmarkGrid;

/// `[market]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    /// Spot price.
    pub spot: Real,
    /// Continuously compounded risk-free rate.
    pub rate: Real,
    /// Continuous dividend yield.
    #[serde(default)]
    pub dividend_yield: Real,
    /// Valuation date.
    pub pricing_date: NaiveDate,
    /// Convention for times to maturity.
    #[serde(default)]
    pub day_counter: DayCounter,
}

/// `[model]`, tagged by `kind`. Each variant rejects fields it does not use.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    /// Geometric Brownian motion.
    Gbm(GbmConfig),
    /// Merton jump diffusion.
    JumpDiffusion(JumpDiffusionConfig),
    /// Heston stochastic volatility.
    StochasticVolatility(StochasticVolatilityConfig),
    /// Bates stochastic volatility with jumps.
    StochasticVolatilityJump(StochasticVolatilityJumpConfig),
}

/// `kind = "gbm"`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GbmConfig {
    /// Diffusion volatility.
    pub volatility: Real,
}

/// `kind = "jump_diffusion"`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JumpDiffusionConfig {
    /// Diffusion volatility.
    pub volatility: Real,
    /// Jumps per year.
    pub jump_intensity: Real,
    /// Mean log jump size.
    pub mean_jump_size: Real,
    /// Standard deviation of the log jump size.
    pub jump_volatility: Real,
}

/// `kind = "stochastic_volatility"`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StochasticVolatilityConfig {
    /// `v0`
    pub initial_variance: Real,
    /// `κ`
    pub mean_reversion_speed: Real,
    /// `θ`
    pub long_run_variance: Real,
    /// `σ`
    pub vol_of_vol: Real,
    /// `ρ`
    pub correlation: Real,
}

/// `kind = "stochastic_volatility_jump"`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StochasticVolatilityJumpConfig {
    /// `v0`
    pub initial_variance: Real,
    /// `κ`
    pub mean_reversion_speed: Real,
    /// `θ`
    pub long_run_variance: Real,
    /// `σ`
    pub vol_of_vol: Real,
    /// `ρ`
    pub correlation: Real,
    /// Jumps per year.
    pub jump_intensity: Real,
    /// Mean log jump size.
    pub mean_jump_size: Real,
    /// Standard deviation of the log jump size.
    pub jump_volatility: Real,
}

/// `[contract]`; strike and maturity may instead come from the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Option<Real>,
    /// Expiry date.
    pub maturity: Option<NaiveDate>,
}

/// `[grid]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Expiry dates.
    pub maturities: Vec<NaiveDate>,
    /// Strikes as multiples of spot.
    pub strike_ratios: Vec<Real>,
}

/// Transform representation named in `[transform]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodName {
    /// Carr–Madan.
    #[default]
    CarrMadan,
    /// Lewis.
    Lewis,
}

/// Quadrature named in `[transform]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadratureName {
    /// Panelled adaptive Gauss–Kronrod.
    #[default]
    Adaptive,
    /// Composite Simpson.
    Fixed,
}

/// `[transform]`; omitted values take the engine defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Transform representation.
    pub method: MethodName,
    /// Carr–Madan damping factor.
    pub alpha: Option<Real>,
    /// Quadrature scheme.
    pub quadrature: QuadratureName,
    /// Adaptive panel width.
    pub panel_width: Option<Real>,
    /// Adaptive tolerance relative to the integrand at zero.
    pub relative_accuracy: Option<Real>,
    /// Adaptive decay threshold.
    pub decay_tolerance: Option<Real>,
    /// Adaptive maximum upper limit.
    pub max_upper_limit: Option<Real>,
    /// Adaptive evaluation budget.
    pub max_evaluations: Option<Size>,
    /// Fixed truncation point.
    pub upper_limit: Option<Real>,
    /// Fixed Simpson intervals.
    pub intervals: Option<Size>,
}

/// A complete experiment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Market inputs.
    pub market: MarketConfig,
    /// Model and its parameters.
    pub model: ModelConfig,
    /// Contract template.
    pub contract: ContractConfig,
    /// Benchmark grid; only needed for benchmarks.
    pub grid: Option<GridConfig>,
    /// Transform settings.
    #[serde(default)]
    pub transform: TransformConfig,
    /// Simulation settings.
    #[serde(default)]
    pub simulation: MonteCarloSettings,
}

fn in_section<T>(section: &str, result: Result<T>) -> Result<T> {
    result.map_err(|e| Error::Config(format!("[{section}] {e}")))
}

impl ExperimentConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validated market parameters.
    pub fn market(&self) -> Result<MarketParameters> {
        let m = &self.market;
        in_section(
            "market",
            MarketParameters::new(m.spot, m.rate, m.pricing_date)
                .and_then(|market| market.with_dividend_yield(m.dividend_yield))
                .map(|market| market.with_day_counter(m.day_counter)),
        )
    }

    /// Validated model parameters.
    pub fn model(&self) -> Result<ModelParameters> {
        let model: Result<ModelParameters> = match &self.model {
            ModelConfig::Gbm(m) => GbmParameters::new(m.volatility).map(Into::into),
            ModelConfig::JumpDiffusion(m) => JumpDiffusionParameters::new(
                m.volatility,
                m.jump_intensity,
                m.mean_jump_size,
                m.jump_volatility,
            )
            .map(Into::into),
            ModelConfig::StochasticVolatility(m) => StochasticVolatilityParameters::new(
                m.initial_variance,
                m.mean_reversion_speed,
                m.long_run_variance,
                m.vol_of_vol,
                m.correlation,
            )
            .map(Into::into),
            ModelConfig::StochasticVolatilityJump(m) => StochasticVolatilityParameters::new(
                m.initial_variance,
                m.mean_reversion_speed,
                m.long_run_variance,
                m.vol_of_vol,
                m.correlation,
            )
            .and_then(|heston| {
                let jumps =
                    JumpParameters::new(m.jump_intensity, m.mean_jump_size, m.jump_volatility)?;
                Ok(StochasticVolatilityJumpParameters::new(heston, jumps).into())
            }),
        };
        in_section("model", model)
    }

    /// Validated transform settings.
    pub fn fourier_settings(&self) -> Result<FourierSettings> {
        let t = &self.transform;
        let method = match t.method {
            MethodName::CarrMadan => TransformMethod::CarrMadan {
                alpha: t.alpha.unwrap_or(DEFAULT_DAMPING),
            },
            MethodName::Lewis => TransformMethod::Lewis,
        };
        let quadrature = match t.quadrature {
            QuadratureName::Adaptive => {
                let defaults = SemiInfiniteIntegral::default();
                in_section(
                    "transform",
                    SemiInfiniteIntegral::new(
                        t.panel_width.unwrap_or(defaults.panel_width()),
                        t.relative_accuracy.unwrap_or(defaults.relative_accuracy()),
                        t.decay_tolerance.unwrap_or(defaults.decay_tolerance()),
                        t.max_upper_limit.unwrap_or(defaults.max_upper_limit()),
                        t.max_evaluations.unwrap_or(defaults.max_evaluations()),
                    ),
                )
                .map(Quadrature::Adaptive)?
            }
            QuadratureName::Fixed => match (t.upper_limit, t.intervals) {
                (Some(upper_limit), Some(intervals)) => Quadrature::Fixed {
                    upper_limit,
                    intervals,
                },
                _ => {
                    return Err(Error::Config(
                        "[transform] fixed quadrature needs upper_limit and intervals".into(),
                    ))
                }
            },
        };
        in_section("transform", FourierSettings::new(method, quadrature))
    }

    /// Validated simulation settings.
    pub fn simulation_settings(&self) -> Result<MonteCarloSettings> {
        in_section("simulation", self.simulation.validate())?;
        Ok(self.simulation)
    }

    /// The contract, with optional overrides for strike and maturity.
    pub fn contract(
        &self,
        strike: Option<Real>,
        maturity: Option<NaiveDate>,
    ) -> Result<ContractParameters> {
        let c = &self.contract;
        let strike = strike
            .or(c.strike)
            .ok_or_else(|| Error::Config("[contract] no strike given".into()))?;
        let maturity = maturity
            .or(c.maturity)
            .ok_or_else(|| Error::Config("[contract] no maturity given".into()))?;
        in_section(
            "contract",
            ContractParameters::new(strike, maturity, c.option_type),
        )
    }

    /// The benchmark grid.
    pub fn grid(&self) -> Result<BenchmarkGrid> {
        let grid = self
            .grid
            .as_ref()
            .ok_or_else(|| Error::Config("missing [grid] section".into()))?;
        in_section(
            "grid",
            BenchmarkGrid::new(grid.maturities.clone(), grid.strike_ratios.clone()),
        )
    }
}

//! Monte Carlo valuation of European options.
//!
//! * [`TerminalSampler`]: samples `ln S_T` for one model and horizon
//! * [`MonteCarloSettings`]: path count, time grid, seeding, antithetics
//! * [`MonteCarloValuation`]: a contract-bound estimator that can be
//!   re-pointed at new strikes and maturities between runs

pub mod sampler;

pub use sampler::{PathDraws, TerminalSampler};

use cfp_core::{
    ensure, ensure_post,
    errors::{Error, Result},
    Real, Size,
};
use cfp_math::Statistics;
use cfp_models::{
    CharacteristicFunction, ContractParameters, MarketParameters, ModelParameters, NaiveDate,
    ValuationHorizon, ValuationResult,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Simulation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Number of simulated paths (antithetic pairs count as two).
    pub paths: Size,
    /// Euler steps per year for the stochastic-volatility models.
    pub time_steps_per_year: Size,
    /// RNG seed.
    pub seed: u64,
    /// Pair every path with its mirror image.
    pub antithetic: bool,
    /// Reuse `seed` on every run; otherwise each run advances it by one.
    pub fixed_seed: bool,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: 100_000,
            time_steps_per_year: 252,
            seed: 42,
            antithetic: true,
            fixed_seed: true,
        }
    }
}

impl MonteCarloSettings {
    /// Check path and step counts.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.paths >= 4,
            "at least 4 paths are needed for a standard error, got {}",
            self.paths
        );
        ensure!(
            self.time_steps_per_year > 0,
            "time steps per year must be positive"
        );
        Ok(())
    }
}

// ─── MonteCarloValuation ──────────────────────────────────────────────────────

/// Monte Carlo estimator bound to one model, market and contract.
///
/// The contract may be updated between runs; every call to
/// [`present_value`](Self::present_value) simulates afresh.
#[derive(Debug, Clone)]
pub struct MonteCarloValuation {
    model: ModelParameters,
    market: MarketParameters,
    contract: ContractParameters,
    settings: MonteCarloSettings,
    runs: u64,
}

impl MonteCarloValuation {
    /// Create an estimator.
    pub fn new(
        model: ModelParameters,
        market: MarketParameters,
        contract: ContractParameters,
        settings: MonteCarloSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            model,
            market,
            contract,
            settings,
            runs: 0,
        })
    }

    /// The contract currently valued.
    pub fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    /// The model simulated.
    pub fn model(&self) -> &ModelParameters {
        &self.model
    }

    /// Simulation settings.
    pub fn settings(&self) -> &MonteCarloSettings {
        &self.settings
    }

    /// Change the strike and/or maturity of the contract.
    pub fn update(&mut self, strike: Option<Real>, maturity: Option<NaiveDate>) -> Result<()> {
        if let Some(strike) = strike {
            self.contract.set_strike(strike)?;
        }
        if let Some(maturity) = maturity {
            self.contract.set_maturity(maturity);
        }
        Ok(())
    }

    /// Seed used by the next run.
    pub fn next_seed(&self) -> u64 {
        if self.settings.fixed_seed {
            self.settings.seed
        } else {
            self.settings.seed.wrapping_add(self.runs)
        }
    }

    /// Simulate the discounted payoff; reports the standard error.
    pub fn present_value(&mut self) -> Result<ValuationResult> {
        let horizon = ValuationHorizon::from_market(&self.market, &self.contract)?;
        let sampler =
            TerminalSampler::new(&self.model, &horizon, self.settings.time_steps_per_year)?;
        let seed = self.next_seed();
        self.runs += 1;

        let strike = self.contract.strike();
        let option_type = self.contract.option_type();
        let discount = horizon.discount_factor();
        let payoff = |log_price: Real| option_type.payoff(log_price.exp(), strike) * discount;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut draws = PathDraws::default();
        let mut stats = Statistics::new();
        if self.settings.antithetic {
            for _ in 0..self.settings.paths.div_ceil(2) {
                sampler.draw(&mut rng, &mut draws);
                let up = payoff(sampler.log_terminal(&draws, 1.0));
                let down = payoff(sampler.log_terminal(&draws, -1.0));
                stats.add(0.5 * (up + down));
            }
        } else {
            for _ in 0..self.settings.paths {
                sampler.draw(&mut rng, &mut draws);
                stats.add(payoff(sampler.log_terminal(&draws, 1.0)));
            }
        }

        let (Some(value), Some(error)) = (stats.mean(), stats.error_estimate()) else {
            return Err(Error::Postcondition(format!(
                "too few samples ({}) for an estimate",
                stats.samples()
            )));
        };
        ensure_post!(
            value.is_finite() && error.is_finite(),
            "non-finite estimate {value} ± {error} over {} samples",
            stats.samples()
        );
        debug!(
            model = %self.model.kind(),
            option_type = %option_type,
            strike,
            time = horizon.time(),
            seed,
            present_value = value,
            standard_error = error,
            "monte carlo valuation"
        );
        Ok(ValuationResult::from_present_value(value)
            .with_standard_error(error)
            .with_result("samples", stats.samples() as Real)
            .with_result("time_steps", sampler.steps() as Real))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cfp_models::{GbmParameters, OptionType};

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 0.05, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()).unwrap()
    }

    fn valuation(settings: MonteCarloSettings) -> MonteCarloValuation {
        let contract = ContractParameters::new(
            100.0,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            OptionType::Call,
        )
        .unwrap();
        MonteCarloValuation::new(
            GbmParameters::new(0.2).unwrap().into(),
            market(),
            contract,
            settings,
        )
        .unwrap()
    }

    #[test]
    fn gbm_call_converges_to_black_scholes() {
        let mut mc = valuation(MonteCarloSettings::default());
        let result = mc.present_value().unwrap();
        let stderr = result.standard_error.unwrap();
        // Black-Scholes: 10.450583572185565
        assert!(
            (result.present_value - 10.450583572185565).abs() < 4.0 * stderr,
            "MC call = {:.4} ± {stderr:.4}",
            result.present_value
        );
    }

    #[test]
    fn antithetic_reduces_standard_error() {
        let plain = MonteCarloSettings {
            paths: 20_000,
            antithetic: false,
            ..Default::default()
        };
        let paired = MonteCarloSettings {
            antithetic: true,
            ..plain
        };
        let err_plain = valuation(plain).present_value().unwrap().standard_error.unwrap();
        let err_paired = valuation(paired).present_value().unwrap().standard_error.unwrap();
        assert!(
            err_paired < err_plain,
            "antithetic err={err_paired:.4} should be below plain err={err_plain:.4}"
        );
    }

    #[test]
    fn fixed_seed_repeats_and_advancing_seed_does_not() {
        let settings = MonteCarloSettings {
            paths: 2_000,
            ..Default::default()
        };
        let mut fixed = valuation(settings);
        let a = fixed.present_value().unwrap().present_value;
        let b = fixed.present_value().unwrap().present_value;
        assert_eq!(a, b);

        let mut advancing = valuation(MonteCarloSettings {
            fixed_seed: false,
            ..settings
        });
        let a = advancing.present_value().unwrap().present_value;
        let b = advancing.present_value().unwrap().present_value;
        assert_ne!(a, b);
    }

    #[test]
    fn update_changes_the_contract() {
        let mut mc = valuation(MonteCarloSettings {
            paths: 10_000,
            ..Default::default()
        });
        let atm = mc.present_value().unwrap().present_value;
        mc.update(Some(80.0), None).unwrap();
        assert_eq!(mc.contract().strike(), 80.0);
        let itm = mc.present_value().unwrap().present_value;
        assert!(itm > atm + 10.0, "{itm} vs {atm}");

        mc.update(None, Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
            .unwrap();
        assert!(mc.present_value().unwrap_err().is_configuration());
        assert!(mc.update(Some(-1.0), None).is_err());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let contract = ContractParameters::new(
            100.0,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            OptionType::Put,
        )
        .unwrap();
        let model: ModelParameters = GbmParameters::new(0.2).unwrap().into();
        let bad = MonteCarloSettings {
            paths: 1,
            ..Default::default()
        };
        assert!(MonteCarloValuation::new(model, market(), contract.clone(), bad).is_err());
        let bad = MonteCarloSettings {
            time_steps_per_year: 0,
            ..Default::default()
        };
        assert!(MonteCarloValuation::new(model, market(), contract, bad).is_err());
    }

    #[test]
    fn overflowing_payoffs_are_a_postcondition_failure() {
        let pricing_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let market = MarketParameters::new(1e308, 0.0, pricing_date).unwrap();
        let contract = ContractParameters::new(
            1e308,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            OptionType::Call,
        )
        .unwrap();
        let settings = MonteCarloSettings {
            paths: 1_000,
            ..Default::default()
        };
        let mut mc = MonteCarloValuation::new(
            GbmParameters::new(1.0).unwrap().into(),
            market,
            contract,
            settings,
        )
        .unwrap();
        let err = mc.present_value().unwrap_err();
        assert!(matches!(err, Error::Postcondition(_)), "{err}");
    }
}

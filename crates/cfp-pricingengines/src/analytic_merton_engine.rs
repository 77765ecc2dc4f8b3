//! Merton (1976) jump-diffusion series.
//!
//! Conditional on `n` jumps the terminal price is log-normal, so the option
//! value is a Poisson-weighted sum of Black-Scholes prices:
//!
//! ```text
//! V = Σₙ e^{−λ'T} (λ'T)ⁿ / n! · BS(S, K, rₙ, q, σₙ, T)
//! λ' = λ(1 + k̄),  σₙ² = σ² + nδ²/T,  rₙ = r − λk̄ + n ln(1 + k̄)/T
//! ```

use cfp_core::{
    errors::{Error, Result},
    Real,
};
use cfp_models::{
    ContractParameters, JumpDiffusionParameters, MarketParameters, OptionType, ValuationHorizon,
    ValuationResult,
};

use crate::{analytic_european_engine::black_scholes_merton, pricer::OptionPricer};

const MAX_TERMS: usize = 1_000;

/// Price a European option under Merton jump diffusion by series expansion.
///
/// Terms are summed past the Poisson mode until one falls below
/// `tolerance` relative to the running total.
pub fn merton76_series_price(
    option_type: OptionType,
    strike: Real,
    horizon: &ValuationHorizon,
    model: &JumpDiffusionParameters,
    tolerance: Real,
) -> Result<Real> {
    let t = horizon.time();
    let jumps = model.jumps();
    let k_bar = jumps.compensator();
    let log_jump = k_bar.ln_1p();
    let lambda_t = jumps.intensity() * (1.0 + k_bar) * t;
    let sigma2 = model.volatility() * model.volatility();
    let delta2 = jumps.jump_volatility() * jumps.jump_volatility();
    let r = horizon.rate();

    let mut weight = (-lambda_t).exp();
    let mut total = 0.0;
    for n in 0..MAX_TERMS {
        let nf = n as Real;
        let sigma_n = (sigma2 + nf * delta2 / t).sqrt();
        let r_n = r - jumps.drift_correction() + nf * log_jump / t;
        let (bs, ..) = black_scholes_merton(
            option_type,
            horizon.spot(),
            strike,
            r_n,
            horizon.dividend_yield(),
            sigma_n,
            t,
        );
        let term = weight * bs;
        total += term;
        weight *= lambda_t / (nf + 1.0);
        if nf >= lambda_t && (weight == 0.0 || term.abs() <= tolerance * total.abs()) {
            return Ok(total);
        }
    }
    Err(Error::Convergence {
        method: "merton76_series_price",
        evaluations: MAX_TERMS,
        upper_limit: MAX_TERMS as Real,
        residual: weight,
    })
}

/// Analytic Merton engine using [`merton76_series_price`].
#[derive(Debug, Clone)]
pub struct AnalyticMertonEngine {
    model: JumpDiffusionParameters,
    tolerance: Real,
}

impl AnalyticMertonEngine {
    /// Create an engine with a relative series tolerance of `1e-14`.
    pub fn new(model: JumpDiffusionParameters) -> Self {
        Self {
            model,
            tolerance: 1e-14,
        }
    }

    /// Override the series truncation tolerance.
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl OptionPricer for AnalyticMertonEngine {
    fn valuation(
        &self,
        contract: &ContractParameters,
        market: &MarketParameters,
    ) -> Result<ValuationResult> {
        let horizon = ValuationHorizon::from_market(market, contract)?;
        let price = merton76_series_price(
            contract.option_type(),
            contract.strike(),
            &horizon,
            &self.model,
            self.tolerance,
        )?;
        Ok(ValuationResult::from_present_value(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_intensity_is_black_scholes() {
        let model = JumpDiffusionParameters::new(0.2, 0.0, -0.1, 0.3).unwrap();
        let h = ValuationHorizon::new(100.0, 0.05, 0.0, 1.0).unwrap();
        let price = merton76_series_price(OptionType::Call, 100.0, &h, &model, 1e-14).unwrap();
        let (bs, ..) = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert!((price - bs).abs() < 1e-12, "{price} vs {bs}");
    }

    #[test]
    fn put_call_parity() {
        let model = JumpDiffusionParameters::new(0.15, 1.2, -0.08, 0.12).unwrap();
        let h = ValuationHorizon::new(100.0, 0.03, 0.01, 0.8).unwrap();
        let call = merton76_series_price(OptionType::Call, 105.0, &h, &model, 1e-14).unwrap();
        let put = merton76_series_price(OptionType::Put, 105.0, &h, &model, 1e-14).unwrap();
        let parity = 100.0 * h.dividend_discount() - 105.0 * h.discount_factor();
        assert!((call - put - parity).abs() < 1e-10, "{call} - {put} vs {parity}");
    }

    #[test]
    fn jumps_add_value_to_atm_options() {
        let h = ValuationHorizon::new(100.0, 0.02, 0.0, 1.0).unwrap();
        let with_jumps = JumpDiffusionParameters::new(0.2, 0.5, -0.1, 0.2).unwrap();
        let without = JumpDiffusionParameters::new(0.2, 0.0, 0.0, 0.0).unwrap();
        let a = merton76_series_price(OptionType::Call, 100.0, &h, &with_jumps, 1e-14).unwrap();
        let b = merton76_series_price(OptionType::Call, 100.0, &h, &without, 1e-14).unwrap();
        assert!(a > b, "{a} <= {b}");
    }
}

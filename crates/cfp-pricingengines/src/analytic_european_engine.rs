//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European options under GBM with the closed-form formula and
//! reports first-order Greeks alongside. Used as the reference the transform
//! engines are checked against.

use cfp_core::{errors::Result, Real};
use cfp_math::distributions::{normal_cdf, normal_pdf};
use cfp_models::{
    ContractParameters, GbmParameters, MarketParameters, OptionType, ValuationHorizon,
    ValuationResult,
};

use crate::pricer::OptionPricer;

/// Analytic pricing engine for European options under GBM.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone)]
pub struct AnalyticEuropeanEngine {
    model: GbmParameters,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine for the given GBM parameters.
    pub fn new(model: GbmParameters) -> Self {
        Self { model }
    }
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// Returns `(price, delta, gamma, vega, theta, rho)`.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> (Real, Real, Real, Real, Real, Real) {
    let phi = option_type.sign();
    let t = time_to_expiry;
    if t <= 0.0 {
        return (option_type.payoff(spot, strike), 0.0, 0.0, 0.0, 0.0, 0.0);
    }

    let sqrt_t = t.sqrt();
    let total_vol = volatility * sqrt_t;
    let discount = (-risk_free_rate * t).exp();
    let carry_discount = (-dividend_yield * t).exp();
    let forward = spot * carry_discount / discount;

    // Probabilities N(φd₁), N(φd₂) and the density n(d₁); a degenerate
    // distribution puts all mass on the forward.
    let (p1, p2, density) = if total_vol > 1e-15 {
        let d1 = (forward / strike).ln() / total_vol + 0.5 * total_vol;
        let d2 = d1 - total_vol;
        (normal_cdf(phi * d1), normal_cdf(phi * d2), normal_pdf(d1))
    } else {
        let in_the_money = if phi * (forward - strike) > 0.0 { 1.0 } else { 0.0 };
        (in_the_money, in_the_money, 0.0)
    };

    let price = phi * discount * (forward * p1 - strike * p2);
    let delta = phi * carry_discount * p1;
    let gamma = if total_vol > 1e-15 {
        carry_discount * density / (spot * total_vol)
    } else {
        0.0
    };
    // per unit of volatility
    let vega = spot * carry_discount * density * sqrt_t;
    // per year
    let theta = -spot * carry_discount * density * volatility / (2.0 * sqrt_t)
        - phi * risk_free_rate * strike * discount * p2
        + phi * dividend_yield * spot * carry_discount * p1;
    let rho = phi * strike * t * discount * p2;

    (price, delta, gamma, vega, theta, rho)
}

impl OptionPricer for AnalyticEuropeanEngine {
    fn valuation(
        &self,
        contract: &ContractParameters,
        market: &MarketParameters,
    ) -> Result<ValuationResult> {
        let horizon = ValuationHorizon::from_market(market, contract)?;
        let (price, delta, gamma, vega, theta, rho) = black_scholes_merton(
            contract.option_type(),
            horizon.spot(),
            contract.strike(),
            horizon.rate(),
            horizon.dividend_yield(),
            self.model.volatility(),
            horizon.time(),
        );

        Ok(ValuationResult::from_present_value(price)
            .with_result("delta", delta)
            .with_result("gamma", gamma)
            .with_result("vega", vega)
            .with_result("theta", theta)
            .with_result("rho", rho))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfp_models::NaiveDate;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, q=0%, σ=20%, T=1
        let (price, delta, gamma, vega, _theta, rho) =
            black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert!((price - 10.450_583_572_185_565).abs() < 1e-10, "price = {price}");
        assert!((delta - 0.636_830_651_175_619).abs() < 1e-10, "delta = {delta}");
        assert!(gamma > 0.0, "gamma = {gamma}");
        assert!(vega > 0.0, "vega = {vega}");
        assert!(rho > 0.0, "rho = {rho}");
    }

    #[test]
    fn bs_put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 105.0, 0.08, 0.03, 0.25, 0.5);
        let (call, ..) = black_scholes_merton(OptionType::Call, s, k, r, q, sigma, t);
        let (put, ..) = black_scholes_merton(OptionType::Put, s, k, r, q, sigma, t);
        let parity = call - s * (-q * t).exp() + k * (-r * t).exp();
        assert!((put - parity).abs() < 1e-10, "put={put}, parity={parity}");
    }

    #[test]
    fn bs_zero_vol_call() {
        // Zero vol → max(S·e^{-qT} − K·e^{-rT}, 0)
        let (price, ..) = black_scholes_merton(OptionType::Call, 100.0, 95.0, 0.05, 0.0, 0.0, 1.0);
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        assert!((price - expected).abs() < 1e-12, "price={price}, expected={expected}");
    }

    #[test]
    fn engine_reports_greeks() {
        let d0 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let market = MarketParameters::new(100.0, 0.05, d0).unwrap();
        let contract = ContractParameters::new(100.0, d1, OptionType::Call).unwrap();
        let engine = AnalyticEuropeanEngine::new(GbmParameters::new(0.2).unwrap());

        let result = engine.valuation(&contract, &market).unwrap();
        assert!((result.present_value - 10.4506).abs() < 1e-4, "{result:?}");
        assert!(result.standard_error.is_none());
        for greek in ["delta", "gamma", "vega", "theta", "rho"] {
            assert!(result.additional_results.contains_key(greek), "missing {greek}");
        }
        assert_eq!(
            engine.present_value(&contract, &market).unwrap(),
            result.present_value
        );
    }
}

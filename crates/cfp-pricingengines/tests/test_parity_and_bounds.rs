//! Model-independent no-arbitrage properties of the transform engines.

use cfp_models::{
    CharacteristicFunction, Complex64, GbmParameters, JumpDiffusionParameters, JumpParameters, ModelParameters, OptionType,
    StochasticVolatilityJumpParameters, StochasticVolatilityParameters, ValuationHorizon,
};
use cfp_pricingengines::{FourierEngine, FourierSettings, Quadrature, TransformMethod};
use proptest::prelude::*;

fn heston() -> StochasticVolatilityParameters {
    StochasticVolatilityParameters::new(0.04, 1.5, 0.05, 0.5, -0.7).unwrap()
}

fn jumps() -> JumpParameters {
    JumpParameters::new(0.5, -0.1, 0.15).unwrap()
}

fn models() -> Vec<ModelParameters> {
    vec![
        GbmParameters::new(0.2).unwrap().into(),
        JumpDiffusionParameters::new(0.2, 0.5, -0.1, 0.15)
            .unwrap()
            .into(),
        heston().into(),
        StochasticVolatilityJumpParameters::new(heston(), jumps()).into(),
    ]
}

fn engines() -> Vec<FourierEngine> {
    let mut engines = Vec::new();
    for model in models() {
        for method in [TransformMethod::default(), TransformMethod::Lewis] {
            let settings = FourierSettings::new(method, Quadrature::default()).unwrap();
            engines.push(FourierEngine::from_model(model, settings).unwrap());
        }
    }
    engines
}

// ─── Put-call parity ─────────────────────────────────────────────────────────

/// Put from the Gil-Pelaez exercise probabilities, independent of the
/// transform integrator; midpoint rule on `(0, 200]`.
fn gil_pelaez_put(model: &ModelParameters, strike: f64, horizon: &ValuationHorizon) -> f64 {
    let (h, n) = (0.01, 20_000);
    let log_strike = strike.ln();
    let forward = model
        .characteristic_function(Complex64::new(0.0, -1.0), horizon)
        .re;
    let (mut p1, mut p2) = (0.0, 0.0);
    for k in 0..n {
        let u = (k as f64 + 0.5) * h;
        let rotation = Complex64::new(0.0, -u * log_strike).exp() / Complex64::new(0.0, u);
        p2 += (rotation * model.characteristic_function(Complex64::new(u, 0.0), horizon)).re;
        p1 += (rotation * model.characteristic_function(Complex64::new(u, -1.0), horizon)).re
            / forward;
    }
    let p1 = 0.5 + p1 * h / std::f64::consts::PI;
    let p2 = 0.5 + p2 * h / std::f64::consts::PI;
    strike * horizon.discount_factor() * (1.0 - p2)
        - horizon.spot() * horizon.dividend_discount() * (1.0 - p1)
}

#[test]
fn test_puts_match_gil_pelaez_probabilities() {
    // Engine puts come from parity with the call, so check them against a
    // separately integrated put.
    let horizon = ValuationHorizon::new(100.0, 0.02, 0.01, 0.75).unwrap();
    for model in models() {
        let engine = FourierEngine::from_model(model, FourierSettings::default()).unwrap();
        for strike in [70.0, 100.0, 140.0] {
            let put = engine.price(strike, OptionType::Put, &horizon).unwrap().price;
            let reference = gil_pelaez_put(&model, strike, &horizon);
            assert!(
                (put - reference).abs() < 1e-7,
                "{:?} K={strike}: engine {put}, Gil-Pelaez {reference}",
                model.kind()
            );
        }
    }
}

#[test]
fn test_put_call_parity_all_models() {
    let horizon = ValuationHorizon::new(100.0, 0.02, 0.01, 0.75).unwrap();
    for engine in engines() {
        for strike in [70.0, 100.0, 140.0] {
            let call = engine.price(strike, OptionType::Call, &horizon).unwrap().price;
            let put = engine.price(strike, OptionType::Put, &horizon).unwrap().price;
            let parity = horizon.spot() * horizon.dividend_discount()
                - strike * horizon.discount_factor();
            assert!(
                (call - put - parity).abs() < 1e-10,
                "{:?} K={strike}: C − P = {}, expected {parity}",
                engine.kind(),
                call - put
            );
            assert!(call >= 0.0 && put >= 0.0, "{:?}: call {call}, put {put}", engine.kind());
        }
    }
}

#[test]
fn test_carr_madan_and_lewis_agree_all_models() {
    let horizon = ValuationHorizon::new(100.0, 0.02, 0.01, 0.75).unwrap();
    let engines = engines();
    for pair in engines.chunks(2) {
        for strike in [80.0, 100.0, 125.0] {
            let a = pair[0].price(strike, OptionType::Call, &horizon).unwrap().price;
            let b = pair[1].price(strike, OptionType::Call, &horizon).unwrap().price;
            assert!((a - b).abs() < 1e-8, "{:?} K={strike}: {a} vs {b}", pair[0].kind());
        }
    }
}

// ─── Strike boundaries ───────────────────────────────────────────────────────

#[test]
fn test_strike_boundaries_all_models() {
    let horizon = ValuationHorizon::new(100.0, 0.02, 0.01, 0.75).unwrap();
    let forward_value = horizon.spot() * horizon.dividend_discount();
    for engine in engines() {
        // Deep in the money: the call is worth its discounted intrinsic value.
        let low = 1.0;
        let call = engine.price(low, OptionType::Call, &horizon).unwrap().price;
        let put = engine.price(low, OptionType::Put, &horizon).unwrap().price;
        let intrinsic = forward_value - low * horizon.discount_factor();
        assert!((call - intrinsic).abs() < 1e-6, "{:?}: call {call} vs {intrinsic}", engine.kind());
        assert!(put.abs() < 1e-6, "{:?}: put {put}", engine.kind());

        // Far out of the money: the call is worthless.
        let high = 1_000.0;
        let call = engine.price(high, OptionType::Call, &horizon).unwrap().price;
        assert!(call.abs() < 1e-6, "{:?}: call {call}", engine.kind());
    }
}

// ─── Monotonicity ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_prices_monotone_in_strike(
        model_index in 0usize..4,
        low in 50.0f64..150.0,
        gap in 0.5f64..40.0,
        time in 0.1f64..2.0,
    ) {
        let horizon = ValuationHorizon::new(100.0, 0.03, 0.0, time).unwrap();
        let engine =
            FourierEngine::from_model(models()[model_index], FourierSettings::default()).unwrap();
        let high = low + gap;

        let call_low = engine.price(low, OptionType::Call, &horizon).unwrap().price;
        let call_high = engine.price(high, OptionType::Call, &horizon).unwrap().price;
        prop_assert!(call_low >= call_high - 1e-7, "call {call_low} < {call_high}");

        let put_low = engine.price(low, OptionType::Put, &horizon).unwrap().price;
        let put_high = engine.price(high, OptionType::Put, &horizon).unwrap().price;
        prop_assert!(put_low <= put_high + 1e-7, "put {put_low} > {put_high}");
    }

    #[test]
    fn prop_put_call_parity(
        model_index in 0usize..4,
        strike in 40.0f64..250.0,
        time in 0.05f64..3.0,
    ) {
        let horizon = ValuationHorizon::new(100.0, 0.01, 0.02, time).unwrap();
        let engine =
            FourierEngine::from_model(models()[model_index], FourierSettings::default()).unwrap();
        let call = engine.price(strike, OptionType::Call, &horizon).unwrap().price;
        let put = engine.price(strike, OptionType::Put, &horizon).unwrap().price;
        let parity = 100.0 * horizon.dividend_discount() - strike * horizon.discount_factor();
        prop_assert!((call - put - parity).abs() < 1e-9);
    }
}

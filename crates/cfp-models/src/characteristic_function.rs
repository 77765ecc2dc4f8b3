//! The characteristic function of the log terminal price.

use crate::{horizon::ValuationHorizon, model::ModelKind};
use cfp_core::Real;
use num_complex::Complex64;
use std::fmt;

/// A model with a closed-form characteristic function
/// `φ(u) = E[exp(i u ln S_T)]` under the risk-neutral measure.
///
/// `u` is complex so that transform methods can evaluate `φ` on shifted
/// contours such as `u − i(α + 1)`.
pub trait CharacteristicFunction: fmt::Debug + Send + Sync {
    /// Which model this is.
    fn kind(&self) -> ModelKind;

    /// `ln φ(u)`, the exponent of the characteristic function.
    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64;

    /// `φ(u)`.
    fn characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        self.log_characteristic_function(u, horizon).exp()
    }
}

/// `i u (ln S0 + (r − q − c) T)`, the deterministic part shared by all
/// models; `c` is the model's drift correction per unit time.
pub(crate) fn drift_exponent(u: Complex64, horizon: &ValuationHorizon, correction: Real) -> Complex64 {
    let drift = horizon.log_spot()
        + (horizon.rate() - horizon.dividend_yield() - correction) * horizon.time();
    Complex64::i() * u * drift
}

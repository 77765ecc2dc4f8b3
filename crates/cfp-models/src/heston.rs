//! Heston (1993) stochastic volatility.
//!
//! ```text
//! dS = (r − q) S dt + √v S dW₁
//! dv = κ(θ − v) dt + σ √v dW₂
//! dW₁ dW₂ = ρ dt
//! ```
//!
//! The characteristic function uses the formulation with `g = (b − d)/(b + d)`
//! and `e^{−dT}` (Albrecher et al., "The little Heston trap"), which stays on
//! the principal branch of the complex logarithm for long maturities and
//! strong correlation. `b − d` is evaluated as `−σ²(iu + u²)/(b + d)` so that
//! small vol-of-vol does not lose precision.

use crate::{
    characteristic_function::{drift_exponent, CharacteristicFunction},
    horizon::ValuationHorizon,
    model::ModelKind,
};
use cfp_core::{ensure, errors::Result, Real};
use num_complex::Complex64;
use serde::Serialize;
use tracing::warn;

/// Below this vol-of-vol the variance path is treated as deterministic.
const DETERMINISTIC_VOL_OF_VOL: Real = 1e-12;

/// Heston model parameters.
///
/// * `initial_variance`: v₀
/// * `mean_reversion_speed`: κ
/// * `long_run_variance`: θ
/// * `vol_of_vol`: σ
/// * `correlation`: ρ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticVolatilityParameters {
    initial_variance: Real,
    mean_reversion_speed: Real,
    long_run_variance: Real,
    vol_of_vol: Real,
    correlation: Real,
}

impl StochasticVolatilityParameters {
    /// Create Heston parameters.
    ///
    /// Variances and vol-of-vol must be non-negative, `κ` strictly positive
    /// and `ρ ∈ [−1, 1]`. A violated Feller condition is allowed but logged.
    pub fn new(
        initial_variance: Real,
        mean_reversion_speed: Real,
        long_run_variance: Real,
        vol_of_vol: Real,
        correlation: Real,
    ) -> Result<Self> {
        ensure!(
            initial_variance >= 0.0 && initial_variance.is_finite(),
            "initial variance must be non-negative, got {initial_variance}"
        );
        ensure!(
            mean_reversion_speed > 0.0 && mean_reversion_speed.is_finite(),
            "mean reversion speed must be positive, got {mean_reversion_speed}"
        );
        ensure!(
            long_run_variance >= 0.0 && long_run_variance.is_finite(),
            "long-run variance must be non-negative, got {long_run_variance}"
        );
        ensure!(
            vol_of_vol >= 0.0 && vol_of_vol.is_finite(),
            "vol-of-vol must be non-negative, got {vol_of_vol}"
        );
        ensure!(
            (-1.0..=1.0).contains(&correlation),
            "correlation must be in [-1, 1], got {correlation}"
        );
        let params = Self {
            initial_variance,
            mean_reversion_speed,
            long_run_variance,
            vol_of_vol,
            correlation,
        };
        if !params.feller_satisfied() {
            warn!(
                kappa = mean_reversion_speed,
                theta = long_run_variance,
                sigma = vol_of_vol,
                "Feller condition 2κθ > σ² violated; variance can reach zero"
            );
        }
        Ok(params)
    }

    /// Initial variance v₀.
    pub fn initial_variance(&self) -> Real {
        self.initial_variance
    }

    /// Mean-reversion speed κ.
    pub fn mean_reversion_speed(&self) -> Real {
        self.mean_reversion_speed
    }

    /// Long-run variance θ.
    pub fn long_run_variance(&self) -> Real {
        self.long_run_variance
    }

    /// Vol-of-vol σ.
    pub fn vol_of_vol(&self) -> Real {
        self.vol_of_vol
    }

    /// Correlation ρ.
    pub fn correlation(&self) -> Real {
        self.correlation
    }

    /// `2κθ > σ²`
    pub fn feller_satisfied(&self) -> bool {
        2.0 * self.mean_reversion_speed * self.long_run_variance > self.vol_of_vol * self.vol_of_vol
    }

    /// `∫₀ᵀ E[v_t] dt = θT + (v₀ − θ)(1 − e^{−κT})/κ`
    pub fn integrated_variance(&self, time: Real) -> Real {
        let kappa = self.mean_reversion_speed;
        self.long_run_variance * time
            + (self.initial_variance - self.long_run_variance) * (-kappa * time).exp_m1() / -kappa
    }
}

impl CharacteristicFunction for StochasticVolatilityParameters {
    fn kind(&self) -> ModelKind {
        ModelKind::StochasticVolatility
    }

    fn log_characteristic_function(&self, u: Complex64, horizon: &ValuationHorizon) -> Complex64 {
        let t = horizon.time();
        let iu = Complex64::i() * u;
        let a = iu + u * u;
        let drift = drift_exponent(u, horizon, 0.0);
        // u = 0 and u = −i: C = D = 0. With κ < ρσ the closed form is 0/0 there.
        if a.norm() == 0.0 {
            return drift;
        }

        let sigma = self.vol_of_vol;
        if sigma < DETERMINISTIC_VOL_OF_VOL {
            return drift - 0.5 * a * self.integrated_variance(t);
        }

        let kappa = self.mean_reversion_speed;
        let sigma2 = sigma * sigma;
        let b = kappa - self.correlation * sigma * iu;
        let mut d = (b * b + sigma2 * a).sqrt();
        if d.re < 0.0 {
            d = -d;
        }
        // (b − d)/σ² and g = (b − d)/(b + d) without cancelling b against d.
        let b_plus_d = b + d;
        let scaled_b_minus_d = -a / b_plus_d;
        let g = scaled_b_minus_d * sigma2 / b_plus_d;
        let e = (-d * t).exp();
        let one = Complex64::new(1.0, 0.0);

        // (1 − g e^{−dT}) / (1 − g) = 1 + w
        let w = g * (one - e) / (one - g);
        let c = kappa * self.long_run_variance * (scaled_b_minus_d * t - 2.0 * ln_1p(w) / sigma2);
        let dd = scaled_b_minus_d * (one - e) / (one - g * e);
        drift + c + dd * self.initial_variance
    }
}

/// `ln(1 + w)`, accurate for small `|w|`.
fn ln_1p(w: Complex64) -> Complex64 {
    if w.norm() < 1e-4 {
        w * (1.0 - w * (0.5 - w * (1.0 / 3.0 - w * 0.25)))
    } else {
        (1.0 + w).ln()
    }
}

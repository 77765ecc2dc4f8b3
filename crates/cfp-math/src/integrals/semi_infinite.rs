//! Integration over `[0, ∞)` by successive finite panels.
//!
//! The domain is covered panel by panel with [`GaussKronrodAdaptive`]. The
//! sweep stops once a panel contributes less than the absolute tolerance and
//! the integrand at the panel's right edge has decayed below a fraction of
//! its size at the origin. Running out of domain or evaluations is reported
//! as [`Error::Convergence`], never as a silently truncated value.

use cfp_core::{
    ensure,
    errors::{Error, Result},
    Real, Size,
};
use tracing::{debug, trace};

use super::GaussKronrodAdaptive;

/// Value of a truncated semi-infinite integral plus the work it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedIntegral {
    /// Integral estimate.
    pub value: Real,
    /// Total integrand evaluations.
    pub evaluations: Size,
    /// Right edge of the last panel integrated.
    pub upper_limit: Real,
}

/// Panelled integrator for `∫₀^∞ f(u) du` with decaying `f`.
#[derive(Debug, Clone)]
pub struct SemiInfiniteIntegral {
    panel_width: Real,
    relative_accuracy: Real,
    decay_tolerance: Real,
    max_upper_limit: Real,
    max_evaluations: Size,
}

impl Default for SemiInfiniteIntegral {
    fn default() -> Self {
        Self {
            panel_width: 10.0,
            relative_accuracy: 1e-12,
            decay_tolerance: 1e-12,
            max_upper_limit: 5_000.0,
            max_evaluations: 500_000,
        }
    }
}

impl SemiInfiniteIntegral {
    /// Create an integrator with explicit limits.
    pub fn new(
        panel_width: Real,
        relative_accuracy: Real,
        decay_tolerance: Real,
        max_upper_limit: Real,
        max_evaluations: Size,
    ) -> Result<Self> {
        ensure!(
            panel_width > 0.0 && panel_width.is_finite(),
            "panel width must be positive and finite, got {panel_width}"
        );
        ensure!(
            relative_accuracy > 0.0,
            "relative accuracy must be positive, got {relative_accuracy}"
        );
        ensure!(
            decay_tolerance > 0.0,
            "decay tolerance must be positive, got {decay_tolerance}"
        );
        ensure!(
            max_upper_limit >= panel_width,
            "maximum upper limit {max_upper_limit} is below one panel ({panel_width})"
        );
        ensure!(max_evaluations > 0, "evaluation budget must be positive");
        Ok(Self {
            panel_width,
            relative_accuracy,
            decay_tolerance,
            max_upper_limit,
            max_evaluations,
        })
    }

    /// Width of each panel.
    pub fn panel_width(&self) -> Real {
        self.panel_width
    }

    /// Panel tolerance relative to `|f(0)|`.
    pub fn relative_accuracy(&self) -> Real {
        self.relative_accuracy
    }

    /// Required decay of `|f|` relative to `|f(0)|`.
    pub fn decay_tolerance(&self) -> Real {
        self.decay_tolerance
    }

    /// Furthest point the sweep may reach.
    pub fn max_upper_limit(&self) -> Real {
        self.max_upper_limit
    }

    /// Evaluation budget shared by all panels.
    pub fn max_evaluations(&self) -> Size {
        self.max_evaluations
    }

    /// Integrate `f` over `[0, ∞)`.
    pub fn integrate<F: Fn(Real) -> Real>(&self, f: F) -> Result<TruncatedIntegral> {
        let f0 = f(0.0);
        if !f0.is_finite() {
            return Err(Error::Convergence {
                method: "SemiInfiniteIntegral (non-finite integrand)",
                evaluations: 1,
                upper_limit: 0.0,
                residual: f0,
            });
        }
        let scale = f0.abs().max(Real::MIN_POSITIVE);
        let tolerance = self.relative_accuracy * scale;
        let rule = GaussKronrodAdaptive::new(tolerance, self.max_evaluations);

        let mut evaluations: Size = 1;
        let mut total = 0.0;
        let mut a = 0.0;
        loop {
            let b = a + self.panel_width;
            let piece = rule.integrate_counted(&f, a, b, &mut evaluations)?;
            total += piece;
            let edge = f(b).abs();
            evaluations += 1;
            trace!(a, b, piece, edge, "panel integrated");

            if piece.abs() <= tolerance && edge <= self.decay_tolerance * scale {
                debug!(
                    value = total,
                    evaluations,
                    upper_limit = b,
                    "semi-infinite integral converged"
                );
                return Ok(TruncatedIntegral {
                    value: total,
                    evaluations,
                    upper_limit: b,
                });
            }
            if b >= self.max_upper_limit {
                return Err(Error::Convergence {
                    method: "SemiInfiniteIntegral",
                    evaluations,
                    upper_limit: b,
                    residual: piece.abs().max(edge),
                });
            }
            a = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn exponential_decay() {
        let integral = SemiInfiniteIntegral::default();
        let result = integral.integrate(|x| (-x).exp()).unwrap();
        assert_relative_eq!(result.value, 1.0, max_relative = 1e-11);
        assert!(result.upper_limit >= 20.0);
        assert!(result.evaluations > 15);
    }

    #[test]
    fn gaussian_half_line() {
        let integral = SemiInfiniteIntegral::default();
        let result = integral.integrate(|x| (-0.5 * x * x).exp()).unwrap();
        assert_relative_eq!(result.value, (PI / 2.0).sqrt(), max_relative = 1e-11);
        // First panel carries the mass, the second confirms the decay.
        assert_eq!(result.upper_limit, 20.0);
    }

    #[test]
    fn damped_oscillation() {
        let integral = SemiInfiniteIntegral::default();
        // ∫₀^∞ e^{-x} cos(3x) dx = 1 / 10
        let result = integral.integrate(|x| (-x).exp() * (3.0 * x).cos()).unwrap();
        assert_relative_eq!(result.value, 0.1, max_relative = 1e-10);
    }

    #[test]
    fn slow_decay_hits_upper_limit() {
        let integral = SemiInfiniteIntegral::new(10.0, 1e-12, 1e-12, 200.0, 500_000).unwrap();
        let err = integral.integrate(|x| 1.0 / (1.0 + x * x)).unwrap_err();
        match err {
            Error::Convergence { upper_limit, .. } => assert_eq!(upper_limit, 200.0),
            other => panic!("expected convergence failure, got {other}"),
        }
    }

    #[test]
    fn evaluation_budget_is_shared_across_panels() {
        let integral = SemiInfiniteIntegral::new(1.0, 1e-12, 1e-12, 5_000.0, 100).unwrap();
        let err = integral.integrate(|x| (-0.01 * x).exp()).unwrap_err();
        assert!(err.is_convergence(), "{err}");
    }

    #[test]
    fn non_finite_integrand_is_reported() {
        let integral = SemiInfiniteIntegral::default();
        let err = integral
            .integrate(|x| if x > 5.0 { Real::NAN } else { 1.0 })
            .unwrap_err();
        assert!(err.is_convergence(), "{err}");
    }

    #[test]
    fn rejects_bad_limits() {
        assert!(SemiInfiniteIntegral::new(0.0, 1e-12, 1e-12, 100.0, 10).is_err());
        assert!(SemiInfiniteIntegral::new(10.0, 1e-12, 1e-12, 5.0, 10).is_err());
        assert!(SemiInfiniteIntegral::new(10.0, -1.0, 1e-12, 100.0, 10).is_err());
    }
}

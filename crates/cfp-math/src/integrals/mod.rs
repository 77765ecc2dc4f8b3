//! Numerical integration.
//!
//! Provides an adaptive Gauss-Kronrod (G7/K15) rule, a fixed-node composite
//! Simpson rule, and a panelled driver for integrals over `[0, ∞)` that
//! truncates the domain once the integrand has decayed.

pub mod semi_infinite;

pub use semi_infinite::{SemiInfiniteIntegral, TruncatedIntegral};

use cfp_core::{
    errors::{Error, Result},
    Real,
};

/// A numerical integrator.
pub trait Integrator {
    /// Integrate `f` on `[a, b]`.
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real>;
}

// ── Gauss-Kronrod ─────────────────────────────────────────────────────────────

/// Kronrod abscissae on `[0, 1]`; odd indices are the 7-point Gauss nodes.
const XGK: [Real; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [Real; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]`, `XGK[7]`.
const WG: [Real; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Evaluations spent by one application of the 15-point rule.
pub(crate) const KRONROD_POINTS: usize = 15;

/// Gauss-Kronrod adaptive integration using the 7/15-point pair.
///
/// Each interval is estimated with the 15-point Kronrod rule; the difference
/// to the embedded 7-point Gauss rule is the error estimate. Intervals whose
/// estimate exceeds their share of the tolerance are bisected.
#[derive(Debug, Clone)]
pub struct GaussKronrodAdaptive {
    absolute_accuracy: Real,
    max_evaluations: usize,
}

impl GaussKronrodAdaptive {
    /// Create a new integrator.
    pub fn new(absolute_accuracy: Real, max_evaluations: usize) -> Self {
        Self {
            absolute_accuracy,
            max_evaluations,
        }
    }

    /// Requested absolute accuracy.
    pub fn absolute_accuracy(&self) -> Real {
        self.absolute_accuracy
    }

    /// Integrate `f` on `[a, b]`, charging evaluations to a shared counter.
    ///
    /// The evaluation cap applies to `evals` as a whole, so a caller
    /// integrating many panels can bound the total work.
    pub fn integrate_counted<F: Fn(Real) -> Real>(
        &self,
        f: &F,
        a: Real,
        b: Real,
        evals: &mut usize,
    ) -> Result<Real> {
        if a == b {
            return Ok(0.0);
        }
        let estimate = self.apply_rule(f, a, b, evals)?;
        self.adapt(f, a, b, estimate, self.absolute_accuracy, evals)
    }

    fn apply_rule<F: Fn(Real) -> Real>(
        &self,
        f: &F,
        a: Real,
        b: Real,
        evals: &mut usize,
    ) -> Result<(Real, Real)> {
        if *evals + KRONROD_POINTS > self.max_evaluations {
            return Err(Error::Convergence {
                method: "GaussKronrodAdaptive",
                evaluations: *evals,
                upper_limit: b,
                residual: Real::NAN,
            });
        }
        *evals += KRONROD_POINTS;

        let centre = 0.5 * (a + b);
        let half = 0.5 * (b - a);

        let f_centre = f(centre);
        let mut kronrod = WGK[7] * f_centre;
        let mut gauss = WG[3] * f_centre;
        for (j, (&x, &w)) in XGK[..7].iter().zip(WGK[..7].iter()).enumerate() {
            let dx = half * x;
            let pair = f(centre - dx) + f(centre + dx);
            kronrod += w * pair;
            if j % 2 == 1 {
                gauss += WG[j / 2] * pair;
            }
        }

        let value = kronrod * half;
        let error = ((kronrod - gauss) * half).abs();
        if !value.is_finite() {
            return Err(Error::Convergence {
                method: "GaussKronrodAdaptive (non-finite integrand)",
                evaluations: *evals,
                upper_limit: b,
                residual: value,
            });
        }
        Ok((value, error))
    }

    fn adapt<F: Fn(Real) -> Real>(
        &self,
        f: &F,
        a: Real,
        b: Real,
        (value, error): (Real, Real),
        tolerance: Real,
        evals: &mut usize,
    ) -> Result<Real> {
        // Below this width further bisection cannot improve on round-off.
        let floor = 50.0 * Real::EPSILON * value.abs();
        if error <= tolerance.max(floor) || (b - a).abs() <= 1e-12 * (1.0 + a.abs()) {
            return Ok(value);
        }
        let mid = 0.5 * (a + b);
        let left = self.apply_rule(f, a, mid, evals)?;
        let right = self.apply_rule(f, mid, b, evals)?;
        let left = self.adapt(f, a, mid, left, 0.5 * tolerance, evals)?;
        let right = self.adapt(f, mid, b, right, 0.5 * tolerance, evals)?;
        Ok(left + right)
    }
}

impl Integrator for GaussKronrodAdaptive {
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real> {
        let mut evals = 0;
        self.integrate_counted(&f, a, b, &mut evals)
    }
}

// ── Fixed composite Simpson ──────────────────────────────────────────────────

/// Composite Simpson's rule on a fixed number of equal sub-intervals.
///
/// Non-adaptive: the node count is chosen by the caller, which makes the
/// rule suitable for resolution studies.
#[derive(Debug, Clone)]
pub struct FixedSimpsonIntegral {
    intervals: usize,
}

impl FixedSimpsonIntegral {
    /// Create a new integrator; `intervals` is rounded up to an even number.
    pub fn new(intervals: usize) -> Self {
        Self {
            intervals: intervals + intervals % 2,
        }
    }

    /// Number of sub-intervals actually used.
    pub fn intervals(&self) -> usize {
        self.intervals
    }
}

impl Integrator for FixedSimpsonIntegral {
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real> {
        let n = self.intervals;
        if n == 0 {
            return Err(Error::InvalidArgument(
                "FixedSimpsonIntegral: intervals must be > 0".into(),
            ));
        }
        if a == b {
            return Ok(0.0);
        }
        let h = (b - a) / n as Real;
        let mut sum = f(a) + f(b);
        for i in 1..n {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * f(a + i as Real * h);
        }
        let value = sum * h / 3.0;
        if !value.is_finite() {
            return Err(Error::Convergence {
                method: "FixedSimpsonIntegral (non-finite integrand)",
                evaluations: n + 1,
                upper_limit: b,
                residual: value,
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn gauss_kronrod_sin() {
        let gk = GaussKronrodAdaptive::new(1e-12, 10_000);
        // ∫₀^π sin(x) dx = 2
        let result = gk.integrate(|x| x.sin(), 0.0, PI).unwrap();
        assert_abs_diff_eq!(result, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn gauss_kronrod_exact_for_polynomials() {
        // The 15-point Kronrod rule integrates degree-22 polynomials exactly.
        let gk = GaussKronrodAdaptive::new(1e-14, 15);
        let result = gk.integrate(|x| x.powi(8), 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(result, 1.0 / 9.0, epsilon = 1e-14);
    }

    #[test]
    fn gauss_kronrod_oscillatory() {
        let gk = GaussKronrodAdaptive::new(1e-10, 100_000);
        // ∫₀^{10} cos(5x) e^{-x} dx = (1 - e^{-10}(cos 50 - 5 sin 50)) / 26
        let expected =
            (1.0 - (-10.0_f64).exp() * ((50.0_f64).cos() - 5.0 * (50.0_f64).sin())) / 26.0;
        let result = gk
            .integrate(|x| (5.0 * x).cos() * (-x).exp(), 0.0, 10.0)
            .unwrap();
        assert_abs_diff_eq!(result, expected, epsilon = 1e-10);
    }

    #[test]
    fn gauss_kronrod_budget_exhausted() {
        let gk = GaussKronrodAdaptive::new(1e-15, 45);
        let err = gk
            .integrate(|x| (1.0 / (x + 1e-3)).sin(), 0.0, 1.0)
            .unwrap_err();
        assert!(err.is_convergence(), "{err}");
    }

    #[test]
    fn gauss_kronrod_non_finite_integrand() {
        let gk = GaussKronrodAdaptive::new(1e-10, 1_000);
        let err = gk.integrate(|_| Real::NAN, 0.0, 1.0).unwrap_err();
        assert!(err.is_convergence(), "{err}");
    }

    #[test]
    fn fixed_simpson_cubic_exact() {
        let s = FixedSimpsonIntegral::new(2);
        // Simpson is exact for cubics: ∫₀² x³ dx = 4
        let result = s.integrate(|x| x * x * x, 0.0, 2.0).unwrap();
        assert_abs_diff_eq!(result, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn fixed_simpson_rounds_to_even() {
        assert_eq!(FixedSimpsonIntegral::new(7).intervals(), 8);
        assert_eq!(FixedSimpsonIntegral::new(8).intervals(), 8);
    }

    #[test]
    fn fixed_simpson_rejects_zero_intervals() {
        let s = FixedSimpsonIntegral::new(0);
        assert!(s.integrate(|x| x, 0.0, 1.0).is_err());
    }
}

//! Terminal log-price sampling.
//!
//! GBM and Merton are sampled exactly in one step. Heston and Bates use a
//! full-truncation Euler scheme for the variance with a log-Euler asset step;
//! their estimates carry discretisation bias.

use cfp_core::{errors::Error, errors::Result, Real, Size};
use cfp_models::{
    JumpParameters, ModelParameters, StochasticVolatilityParameters, ValuationHorizon,
};
use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal};

/// Random inputs for one path, kept so the antithetic path can reuse them.
#[derive(Debug, Clone, Default)]
pub struct PathDraws {
    normals: Vec<Real>,
    jump_counts: Vec<Real>,
}

/// Compound-Poisson jumps over a fixed step.
#[derive(Debug, Clone)]
struct JumpStep {
    counts: Poisson<Real>,
    mean: Real,
    volatility: Real,
}

impl JumpStep {
    /// `None` when no jump can occur over `dt`.
    fn new(jumps: &JumpParameters, dt: Real) -> Result<Option<Self>> {
        let rate = jumps.intensity() * dt;
        if rate <= 0.0 {
            return Ok(None);
        }
        let counts = Poisson::new(rate).map_err(|e| {
            Error::InvalidArgument(format!("Poisson jump count with rate {rate}: {e}"))
        })?;
        Ok(Some(Self {
            counts,
            mean: jumps.mean_jump_size(),
            volatility: jumps.jump_volatility(),
        }))
    }

    /// Sum of `n` normal jump sizes, given one standard normal `z`.
    fn log_jump(&self, n: Real, z: Real) -> Real {
        n * self.mean + self.volatility * n.sqrt() * z
    }
}

#[derive(Debug, Clone)]
enum Scheme {
    /// `ln S_T = ln S0 + drift + σ√T z (+ jumps)`.
    Exact {
        drift: Real,
        diffusion: Real,
        jumps: Option<JumpStep>,
    },
    /// Full-truncation Euler on a uniform grid.
    Euler {
        heston: StochasticVolatilityParameters,
        carry: Real,
        dt: Real,
        steps: Size,
        jumps: Option<JumpStep>,
    },
}

/// Samples `ln S_T` for one model and horizon.
#[derive(Debug, Clone)]
pub struct TerminalSampler {
    log_spot: Real,
    scheme: Scheme,
}

impl TerminalSampler {
    /// Build a sampler; `time_steps_per_year` only affects the Euler models.
    pub fn new(
        model: &ModelParameters,
        horizon: &ValuationHorizon,
        time_steps_per_year: Size,
    ) -> Result<Self> {
        let t = horizon.time();
        let carry = horizon.rate() - horizon.dividend_yield();
        let steps = ((t * time_steps_per_year as Real).ceil() as Size).max(1);
        let dt = t / steps as Real;

        let scheme = match model {
            ModelParameters::Gbm(m) => {
                let sigma = m.volatility();
                Scheme::Exact {
                    drift: (carry - 0.5 * sigma * sigma) * t,
                    diffusion: sigma * t.sqrt(),
                    jumps: None,
                }
            }
            ModelParameters::JumpDiffusion(m) => {
                let sigma = m.volatility();
                Scheme::Exact {
                    drift: (carry - m.jumps().drift_correction() - 0.5 * sigma * sigma) * t,
                    diffusion: sigma * t.sqrt(),
                    jumps: JumpStep::new(m.jumps(), t)?,
                }
            }
            ModelParameters::StochasticVolatility(m) => Scheme::Euler {
                heston: *m,
                carry,
                dt,
                steps,
                jumps: None,
            },
            ModelParameters::StochasticVolatilityJump(m) => Scheme::Euler {
                heston: *m.stochastic_volatility(),
                carry: carry - m.jumps().drift_correction(),
                dt,
                steps,
                jumps: JumpStep::new(m.jumps(), dt)?,
            },
        };
        Ok(Self {
            log_spot: horizon.log_spot(),
            scheme,
        })
    }

    /// Time steps per path.
    pub fn steps(&self) -> Size {
        match &self.scheme {
            Scheme::Exact { .. } => 1,
            Scheme::Euler { steps, .. } => *steps,
        }
    }

    /// Draw the random inputs for one path into `draws`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, draws: &mut PathDraws) {
        draws.normals.clear();
        draws.jump_counts.clear();
        let (steps, normals_per_step, jumps) = match &self.scheme {
            Scheme::Exact { jumps, .. } => (1, 1, jumps),
            Scheme::Euler { steps, jumps, .. } => (*steps, 2, jumps),
        };
        for _ in 0..steps {
            for _ in 0..normals_per_step {
                draws.normals.push(StandardNormal.sample(rng));
            }
            if let Some(jump) = jumps {
                draws.jump_counts.push(jump.counts.sample(rng));
                draws.normals.push(StandardNormal.sample(rng));
            }
        }
    }

    /// `ln S_T` from `draws`, with every normal multiplied by `sign`.
    pub fn log_terminal(&self, draws: &PathDraws, sign: Real) -> Real {
        let z = |i: usize| sign * draws.normals[i];
        match &self.scheme {
            Scheme::Exact {
                drift,
                diffusion,
                jumps,
            } => {
                let mut x = self.log_spot + drift + diffusion * z(0);
                if let Some(jump) = jumps {
                    x += jump.log_jump(draws.jump_counts[0], z(1));
                }
                x
            }
            Scheme::Euler {
                heston,
                carry,
                dt,
                steps,
                jumps,
            } => {
                let kappa = heston.mean_reversion_speed();
                let theta = heston.long_run_variance();
                let sigma = heston.vol_of_vol();
                let rho = heston.correlation();
                let rho_bar = (1.0 - rho * rho).sqrt();
                let stride = if jumps.is_some() { 3 } else { 2 };

                let mut x = self.log_spot;
                let mut v = heston.initial_variance();
                for step in 0..*steps {
                    let base = step * stride;
                    let (z1, z2) = (z(base), z(base + 1));
                    let v_plus = v.max(0.0);
                    let root = (v_plus * dt).sqrt();
                    x += (carry - 0.5 * v_plus) * dt + root * z1;
                    if let Some(jump) = jumps {
                        x += jump.log_jump(draws.jump_counts[step], z(base + 2));
                    }
                    v += kappa * (theta - v_plus) * dt + sigma * root * (rho * z1 + rho_bar * z2);
                }
                x
            }
        }
    }
}

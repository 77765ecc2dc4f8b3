//! Simulation-versus-transform comparison over a maturity × strike grid.

use std::time::Instant;

use cfp_core::{ensure, errors::Result, Real, Time};
use cfp_models::{ContractParameters, MarketParameters, NaiveDate, OptionType};
use cfp_pricingengines::OptionPricer;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::{
    error::BenchmarkError,
    report::BenchmarkReport,
    simulation::SimulationValuation,
};

// ─── Grid ─────────────────────────────────────────────────────────────────────

/// Maturities and strike ratios, each sorted ascending without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkGrid {
    maturities: Vec<NaiveDate>,
    strike_ratios: Vec<Real>,
}

impl BenchmarkGrid {
    /// Build a grid; both axes must be non-empty and ratios positive.
    pub fn new(mut maturities: Vec<NaiveDate>, mut strike_ratios: Vec<Real>) -> Result<Self> {
        ensure!(!maturities.is_empty(), "benchmark grid has no maturities");
        ensure!(!strike_ratios.is_empty(), "benchmark grid has no strike ratios");
        for &ratio in &strike_ratios {
            ensure!(
                ratio > 0.0 && ratio.is_finite(),
                "strike ratio must be positive and finite, got {ratio}"
            );
        }
        maturities.sort_unstable();
        maturities.dedup();
        strike_ratios.sort_by(Real::total_cmp);
        strike_ratios.dedup();
        Ok(Self {
            maturities,
            strike_ratios,
        })
    }

    /// Maturities, ascending.
    pub fn maturities(&self) -> &[NaiveDate] {
        &self.maturities
    }

    /// Strike ratios, ascending.
    pub fn strike_ratios(&self) -> &[Real] {
        &self.strike_ratios
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.maturities.len() * self.strike_ratios.len()
    }

    /// Always `false`; construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Transform values below `TRANSFORM_NOISE_FLOOR × spot` in magnitude are
/// quadrature round-off, not prices; their relative difference is undefined.
pub const TRANSFORM_NOISE_FLOOR: Real = 1e-10;

/// Deviation relative to the transform value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeDifference {
    /// `100 · (simulated − transform) / transform`.
    Percent(Real),
    /// The transform value is zero up to the noise floor.
    Undefined,
}

impl RelativeDifference {
    /// Compare against a transform value; `|transform_value| <= noise_floor`
    /// counts as zero.
    pub fn new(absolute_difference: Real, transform_value: Real, noise_floor: Real) -> Self {
        if transform_value.abs() <= noise_floor {
            RelativeDifference::Undefined
        } else {
            RelativeDifference::Percent(100.0 * absolute_difference / transform_value)
        }
    }

    /// The percentage, if defined.
    pub fn percent(self) -> Option<Real> {
        match self {
            RelativeDifference::Percent(p) => Some(p),
            RelativeDifference::Undefined => None,
        }
    }
}

impl fmt::Display for RelativeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeDifference::Percent(p) => write!(f, "{p:.4}%"),
            RelativeDifference::Undefined => write!(f, "undefined"),
        }
    }
}

/// One compared grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    /// Expiry date.
    pub maturity: NaiveDate,
    /// Year fraction from the pricing date to `maturity`.
    pub time_to_maturity: Time,
    /// Strike price.
    pub strike: Real,
    /// Simulation estimate.
    pub simulated_value: Real,
    /// Standard error of the simulation estimate.
    pub standard_error: Option<Real>,
    /// Transform price.
    pub transform_value: Real,
    /// `simulated − transform`.
    pub absolute_difference: Real,
    /// Deviation in percent of the transform price.
    pub relative_difference: RelativeDifference,
}

impl BenchmarkRow {
    /// Compare a simulated and a transform value. `noise_floor` is the
    /// absolute transform magnitude treated as zero.
    pub fn new(
        maturity: NaiveDate,
        time_to_maturity: Time,
        strike: Real,
        simulated_value: Real,
        standard_error: Option<Real>,
        transform_value: Real,
        noise_floor: Real,
    ) -> Self {
        let absolute_difference = simulated_value - transform_value;
        Self {
            maturity,
            time_to_maturity,
            strike,
            simulated_value,
            standard_error,
            transform_value,
            absolute_difference,
            relative_difference: RelativeDifference::new(
                absolute_difference,
                transform_value,
                noise_floor,
            ),
        }
    }
}

// ─── Harness ──────────────────────────────────────────────────────────────────

/// Drives a transform pricer and a simulation over a grid.
#[derive(Debug)]
pub struct BenchmarkHarness<'a, P: OptionPricer + ?Sized> {
    pricer: &'a P,
    market: &'a MarketParameters,
    option_type: OptionType,
}

impl<'a, P: OptionPricer + ?Sized> BenchmarkHarness<'a, P> {
    /// Create a harness comparing `option_type` contracts under `market`.
    pub fn new(pricer: &'a P, market: &'a MarketParameters, option_type: OptionType) -> Self {
        Self {
            pricer,
            market,
            option_type,
        }
    }

    /// Compare every grid point, maturities outer and strikes inner.
    ///
    /// The simulation is updated and queried exactly once per point. The
    /// first failure aborts the sweep.
    pub fn run<S: SimulationValuation>(
        &self,
        grid: &BenchmarkGrid,
        simulation: &mut S,
    ) -> Result<BenchmarkReport, BenchmarkError<S::Error>> {
        info!(
            points = grid.len(),
            option_type = %self.option_type,
            "benchmark sweep started"
        );
        let started = Instant::now();
        let spot = self.market.spot();
        let noise_floor = TRANSFORM_NOISE_FLOOR * spot;
        let mut rows = Vec::with_capacity(grid.len());

        for &maturity in grid.maturities() {
            for &ratio in grid.strike_ratios() {
                let strike = ratio * spot;
                let pricing_error = |source| -> BenchmarkError<S::Error> {
                    BenchmarkError::Pricing {
                        maturity,
                        strike,
                        source,
                    }
                };
                let simulation_error = |source| -> BenchmarkError<S::Error> {
                    BenchmarkError::Simulation {
                        maturity,
                        strike,
                        source,
                    }
                };

                let contract = ContractParameters::new(strike, maturity, self.option_type)
                    .map_err(pricing_error)?;
                let time = contract
                    .time_to_maturity(self.market)
                    .map_err(pricing_error)?;

                simulation
                    .update(Some(strike), Some(maturity))
                    .map_err(simulation_error)?;
                let simulated = simulation.present_value().map_err(simulation_error)?;
                let transform = self
                    .pricer
                    .present_value(&contract, self.market)
                    .map_err(pricing_error)?;

                let row = BenchmarkRow::new(
                    maturity,
                    time,
                    strike,
                    simulated.present_value,
                    simulated.standard_error,
                    transform,
                    noise_floor,
                );
                if row.relative_difference == RelativeDifference::Undefined {
                    warn!(
                        %maturity,
                        strike,
                        transform,
                        "transform value below noise floor; relative difference undefined"
                    );
                }
                debug!(
                    %maturity,
                    strike,
                    simulated = row.simulated_value,
                    transform = row.transform_value,
                    "grid point compared"
                );
                rows.push(row);
            }
        }

        let report = BenchmarkReport::new(rows, started.elapsed());
        info!(
            points = report.rows.len(),
            elapsed_seconds = report.elapsed_seconds,
            max_absolute_difference = report.summary.max_absolute_difference,
            "benchmark sweep finished"
        );
        Ok(report)
    }
}

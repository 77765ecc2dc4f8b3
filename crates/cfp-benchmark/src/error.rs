//! Benchmark failures.

use cfp_core::Real;
use chrono::NaiveDate;
use thiserror::Error;

/// A grid point that could not be compared.
///
/// Generic over the simulation collaborator's error type, which is kept
/// unchanged as the `source`.
#[derive(Debug, Error)]
pub enum BenchmarkError<E>
where
    E: std::error::Error + 'static,
{
    /// The contract or the transform valuation failed.
    #[error("transform pricing failed at maturity {maturity}, strike {strike}")]
    Pricing {
        /// Maturity of the grid point.
        maturity: NaiveDate,
        /// Strike of the grid point.
        strike: Real,
        /// Underlying pricing error.
        #[source]
        source: cfp_core::Error,
    },

    /// The simulation collaborator failed.
    #[error("simulation failed at maturity {maturity}, strike {strike}")]
    Simulation {
        /// Maturity of the grid point.
        maturity: NaiveDate,
        /// Strike of the grid point.
        strike: Real,
        /// Error reported by the collaborator.
        #[source]
        source: E,
    },
}

impl<E: std::error::Error + 'static> BenchmarkError<E> {
    /// `true` when the simulation collaborator is at fault.
    pub fn is_simulation(&self) -> bool {
        matches!(self, BenchmarkError::Simulation { .. })
    }
}

//! Result of a single valuation.

use cfp_core::Real;
use serde::Serialize;
use std::collections::BTreeMap;

/// Present value with an optional standard error and named diagnostics.
///
/// Transform engines leave `standard_error` empty; simulations fill it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    /// Present value.
    pub present_value: Real,
    /// Standard error of a simulation estimate.
    pub standard_error: Option<Real>,
    /// Additional named results (evaluation counts, truncation points, ...).
    pub additional_results: BTreeMap<String, Real>,
}

impl ValuationResult {
    /// A result with just a present value.
    pub fn from_present_value(present_value: Real) -> Self {
        Self {
            present_value,
            standard_error: None,
            additional_results: BTreeMap::new(),
        }
    }

    /// Attach a standard error.
    pub fn with_standard_error(mut self, standard_error: Real) -> Self {
        self.standard_error = Some(standard_error);
        self
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }
}

//! Benchmark rows plus a summary, with a fixed-width text rendering.

use std::{fmt, time::Duration};

use cfp_core::Real;
use serde::Serialize;

use crate::harness::BenchmarkRow;

/// Aggregate deviation over a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    /// Largest `|simulated − transform|`.
    pub max_absolute_difference: Real,
    /// Mean of `|relative difference|` over rows where it is defined.
    pub mean_absolute_relative_difference_pct: Option<Real>,
    /// Rows whose relative difference is undefined.
    pub undefined_ratios: usize,
}

impl BenchmarkSummary {
    fn from_rows(rows: &[BenchmarkRow]) -> Self {
        let max_absolute_difference = rows
            .iter()
            .map(|r| r.absolute_difference.abs())
            .fold(0.0, Real::max);
        let defined: Vec<Real> = rows
            .iter()
            .filter_map(|r| r.relative_difference.percent())
            .map(Real::abs)
            .collect();
        let mean_absolute_relative_difference_pct = if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<Real>() / defined.len() as Real)
        };
        Self {
            max_absolute_difference,
            mean_absolute_relative_difference_pct,
            undefined_ratios: rows.len() - defined.len(),
        }
    }
}

/// Result of a benchmark sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Compared grid points, maturities outer and strikes inner.
    pub rows: Vec<BenchmarkRow>,
    /// Wall time of the sweep.
    pub elapsed_seconds: Real,
    /// Aggregate deviation.
    pub summary: BenchmarkSummary,
}

impl BenchmarkReport {
    /// Summarise `rows`.
    pub fn new(rows: Vec<BenchmarkRow>, elapsed: Duration) -> Self {
        let summary = BenchmarkSummary::from_rows(&rows);
        Self {
            rows,
            elapsed_seconds: elapsed.as_secs_f64(),
            summary,
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>10} {:>12} {:>10} {:>12} {:>12} {:>11}",
            "T", "strike", "simulated", "std err", "transform", "abs diff", "rel diff"
        )?;
        for row in &self.rows {
            let standard_error = row
                .standard_error
                .map_or_else(|| "-".to_string(), |e| format!("{e:.6}"));
            writeln!(
                f,
                "{:>8.4} {:>10.4} {:>12.6} {:>10} {:>12.6} {:>12.6} {:>11}",
                row.time_to_maturity,
                row.strike,
                row.simulated_value,
                standard_error,
                row.transform_value,
                row.absolute_difference,
                row.relative_difference.to_string()
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "max |abs diff|       {:.6}",
            self.summary.max_absolute_difference
        )?;
        match self.summary.mean_absolute_relative_difference_pct {
            Some(mean) => writeln!(f, "mean |rel diff|      {mean:.4}%")?,
            None => writeln!(f, "mean |rel diff|      undefined")?,
        }
        writeln!(f, "undefined ratios     {}", self.summary.undefined_ratios)?;
        write!(f, "elapsed              {:.3}s", self.elapsed_seconds)
    }
}

//! Day-count conventions turning a pair of dates into a year fraction.

use cfp_core::{Real, Time};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A convention for counting the fraction of a year between two dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCounter {
    /// `actual_days / 365`
    #[default]
    Actual365Fixed,
    /// `actual_days / 360`
    Actual360,
    /// Actual days split at year boundaries, each part divided by the
    /// length of its own year.
    ActualActualIsda,
}

impl DayCounter {
    /// Human-readable name of this convention.
    pub fn name(&self) -> &'static str {
        match self {
            DayCounter::Actual365Fixed => "Actual/365 (Fixed)",
            DayCounter::Actual360 => "Actual/360",
            DayCounter::ActualActualIsda => "Actual/Actual (ISDA)",
        }
    }

    /// Number of calendar days from `d1` to `d2`.
    pub fn day_count(&self, d1: NaiveDate, d2: NaiveDate) -> i64 {
        (d2 - d1).num_days()
    }

    /// Fraction of a year from `d1` to `d2`; negative when `d2 < d1`.
    pub fn year_fraction(&self, d1: NaiveDate, d2: NaiveDate) -> Time {
        match self {
            DayCounter::Actual365Fixed => self.day_count(d1, d2) as Real / 365.0,
            DayCounter::Actual360 => self.day_count(d1, d2) as Real / 360.0,
            DayCounter::ActualActualIsda => {
                if d2 < d1 {
                    return -self.year_fraction(d2, d1);
                }
                let (y1, y2) = (d1.year(), d2.year());
                if y1 == y2 {
                    return self.day_count(d1, d2) as Real / days_in_year(y1);
                }
                let first = self.day_count(d1, year_start(y1 + 1)) as Real / days_in_year(y1);
                let last = self.day_count(year_start(y2), d2) as Real / days_in_year(y2);
                first + (y2 - y1 - 1) as Real + last
            }
        }
    }
}

fn days_in_year(year: i32) -> Real {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_yo_opt(year, 1).unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn actual365_fixed() {
        let dc = DayCounter::Actual365Fixed;
        assert_eq!(dc.day_count(date(2015, 1, 1), date(2015, 3, 31)), 89);
        let t = dc.year_fraction(date(2015, 1, 1), date(2015, 3, 31));
        assert!((t - 89.0 / 365.0).abs() < 1e-15);
        assert!((dc.year_fraction(date(2023, 1, 1), date(2024, 1, 1)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn actual360() {
        let dc = DayCounter::Actual360;
        assert!((dc.year_fraction(date(2023, 1, 1), date(2023, 7, 1)) - 181.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn actual_actual_isda_spans_leap_year() {
        let dc = DayCounter::ActualActualIsda;
        // 2023-07-01 → 2025-07-01: 184/365 + 1 (2024) + 181/365
        let t = dc.year_fraction(date(2023, 7, 1), date(2025, 7, 1));
        let expected = 184.0 / 365.0 + 1.0 + 181.0 / 365.0;
        assert!((t - expected).abs() < 1e-12, "got {t}, expected {expected}");
        assert!((dc.year_fraction(date(2024, 1, 1), date(2025, 1, 1)) - 1.0).abs() < 1e-12);
        assert!((dc.year_fraction(date(2025, 7, 1), date(2023, 7, 1)) + expected).abs() < 1e-12);
    }
}

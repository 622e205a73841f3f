//! Growth Calculator
//!
//! Turns an annual series of records for one company into a series of
//! year-over-year growth entries, one per consecutive pair of fiscal years.

use super::GrowthEntry;
use finbro_data::FinancialMetric;
use thiserror::Error;
use tracing::trace;

/// Caller-input errors detected before any growth is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// Two records cover the same fiscal year
    #[error("Duplicate fiscal year {year} for {ticker}")]
    DuplicateYear {
        /// Ticker of the offending series
        ticker: String,
        /// Year that appears more than once
        year: i32,
    },

    /// The series mixes records from different companies
    #[error("Mixed tickers in one series: expected {expected}, found {found}")]
    MixedTickers {
        /// Ticker of the first record
        expected: String,
        /// First ticker that differs from it
        found: String,
    },
}

/// Computes year-over-year growth for an annual series.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthCalculator;

impl GrowthCalculator {
    /// Create a new calculator.
    pub const fn new() -> Self {
        Self
    }

    /// Compute growth entries in ascending year order.
    ///
    /// Fewer than two records is not an error and yields no entries. Pairs
    /// whose earlier year has zero revenue are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::MixedTickers`] if the records belong to more than
    /// one ticker and [`GrowthError::DuplicateYear`] if a year repeats.
    pub fn compute(&self, records: &[FinancialMetric]) -> Result<Vec<GrowthEntry>, GrowthError> {
        let Some(first) = records.first() else {
            return Ok(Vec::new());
        };

        if let Some(other) = records.iter().find(|r| r.ticker != first.ticker) {
            return Err(GrowthError::MixedTickers {
                expected: first.ticker.clone(),
                found: other.ticker.clone(),
            });
        }

        if records.len() < 2 {
            return Ok(Vec::new());
        }

        let mut sorted: Vec<&FinancialMetric> = records.iter().collect();
        sorted.sort_by_key(|r| r.year);

        if let Some(pair) = sorted.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(GrowthError::DuplicateYear {
                ticker: first.ticker.clone(),
                year: pair[0].year,
            });
        }

        let entries = sorted
            .windows(2)
            .filter_map(|pair| {
                let (previous, current) = (pair[0], pair[1]);
                let entry = GrowthEntry::between(previous, current);
                if entry.is_none() {
                    trace!(
                        ticker = %current.ticker,
                        year = current.year,
                        "Skipping pair with zero prior-year revenue"
                    );
                }
                entry
            })
            .collect();

        Ok(entries)
    }
}

/// Compute year-over-year growth entries for one company's annual records.
///
/// Shorthand for [`GrowthCalculator::compute`].
pub fn compute_growth(records: &[FinancialMetric]) -> Result<Vec<GrowthEntry>, GrowthError> {
    GrowthCalculator::new().compute(records)
}

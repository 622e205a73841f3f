//! Sources of annual financial records.
//!
//! A [`MetricsSource`] hands out already-typed [`FinancialMetric`] values for
//! a ticker. How the records are obtained is up to the implementation.

pub mod file;
pub mod memory;

pub use file::{FileSource, RecordFormat, parse_csv, parse_json};
pub use memory::InMemorySource;

use crate::error::Result;
use crate::metric::FinancialMetric;
use std::future::Future;

/// Supplier of annual financial records for a single entity.
pub trait MetricsSource {
    /// Short human-readable name of the source, used in logs.
    fn name(&self) -> &str;

    /// Fetch every annual record available for `ticker`.
    ///
    /// Records come back in source order; callers must not assume sorting.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker is invalid, unknown to the source, or
    /// its records cannot be decoded.
    fn fetch_metrics(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<Vec<FinancialMetric>>> + Send;
}

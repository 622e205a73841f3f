//! In-memory record source, mostly for tests and embedding.

use super::MetricsSource;
use crate::error::{DataError, Result};
use crate::metric::{FinancialMetric, normalize_ticker};
use std::collections::HashMap;

/// Records held in memory, keyed by normalized ticker.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: HashMap<String, Vec<FinancialMetric>>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from records, grouping them by their own ticker.
    ///
    /// Records with an invalid ticker are dropped.
    pub fn from_metrics(metrics: impl IntoIterator<Item = FinancialMetric>) -> Self {
        let mut source = Self::new();
        for metric in metrics {
            if let Ok(ticker) = normalize_ticker(&metric.ticker) {
                source.records.entry(ticker).or_default().push(metric);
            }
        }
        source
    }

    /// Append a record under its ticker.
    pub fn insert(&mut self, metric: FinancialMetric) -> Result<()> {
        let ticker = normalize_ticker(&metric.ticker)?;
        self.records.entry(ticker).or_default().push(metric);
        Ok(())
    }

    /// Tickers with at least one record, sorted.
    pub fn tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.records.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }
}

impl MetricsSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_metrics(&self, ticker: &str) -> Result<Vec<FinancialMetric>> {
        let ticker = normalize_ticker(ticker)?;
        self.records
            .get(&ticker)
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol: ticker,
                reason: "No records loaded".to_string(),
            })
    }
}

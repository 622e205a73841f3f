//! Growth analysis pipeline.
//!
//! Fetches a ticker's annual records from a [`MetricsSource`], computes the
//! latest-year profitability snapshot and the year-over-year growth series,
//! and packages both into a [`GrowthReport`].

use finbro_data::{DataError, FinancialMetric, MetricsSource, latest, normalize_ticker};
use finbro_metrics::{GrowthCalculator, GrowthError, ProfitabilitySnapshot};
use finbro_output::{GrowthReport, GrowthReportBuilder, ReportError};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of tickers analyzed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Error type for analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Records could not be loaded.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Records were inconsistent.
    #[error("Growth error: {0}")]
    Growth(#[from] GrowthError),

    /// Report could not be assembled.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Build a growth report from records already in hand.
///
/// # Errors
///
/// Returns an error if the records belong to a ticker other than `ticker`,
/// mix tickers, or repeat a fiscal year.
pub fn build_report(
    ticker: &str,
    records: &[FinancialMetric],
) -> Result<GrowthReport, AnalysisError> {
    if let Some(first) = records.first().filter(|r| r.ticker != ticker) {
        return Err(GrowthError::MixedTickers {
            expected: ticker.to_string(),
            found: first.ticker.clone(),
        }
        .into());
    }

    let growth = GrowthCalculator::new().compute(records)?;
    let snapshot = latest(records).map(ProfitabilitySnapshot::from_metric);

    let report = GrowthReportBuilder::new()
        .ticker(ticker)
        .record_years(records.iter().map(|r| r.year))
        .latest(snapshot)
        .growth(growth)
        .build()?;

    Ok(report)
}

/// Fetch records for `ticker` and analyze them.
///
/// # Errors
///
/// Returns an error if the ticker is invalid, the source fails, or the
/// records are inconsistent.
pub async fn analyze<S: MetricsSource>(
    source: &S,
    ticker: &str,
) -> Result<GrowthReport, AnalysisError> {
    let ticker = normalize_ticker(ticker)?;
    let records = source.fetch_metrics(&ticker).await?;
    debug!(
        ticker = %ticker,
        source = source.name(),
        records = records.len(),
        "Fetched records for analysis"
    );

    build_report(&ticker, &records)
}

/// Analyze several tickers with bounded concurrency.
///
/// Results come back in the order of `tickers`, one per ticker; a failure for
/// one ticker does not abort the others.
pub async fn analyze_many<S: MetricsSource>(
    source: &S,
    tickers: &[String],
    concurrency: usize,
) -> Vec<(String, Result<GrowthReport, AnalysisError>)> {
    stream::iter(tickers)
        .map(|ticker| async move {
            let result = analyze(source, ticker).await;
            if let Err(e) = &result {
                warn!(ticker = %ticker, error = %e, "Analysis failed");
            }
            (ticker.clone(), result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

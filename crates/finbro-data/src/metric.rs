//! Annual financial records.
//!
//! A [`FinancialMetric`] is one fiscal year of income statement, cash flow and
//! balance sheet figures for a single company. The four income statement
//! amounts are required; everything else is optional and defaults to absent
//! when a source omits it.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fiscal year of financial data for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetric {
    /// Stock ticker
    pub ticker: String,
    /// Fiscal year covered by the record
    pub year: i32,

    // Income Statement Items
    /// Total revenue
    pub revenue: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Operating income
    pub operating_income: f64,
    /// Net income
    pub net_income: f64,

    // Cash Flow Items
    /// Cash from operating activities
    #[serde(default)]
    pub cash_from_operations: Option<f64>,
    /// Cash from financing activities
    #[serde(default)]
    pub cash_from_financing: Option<f64>,
    /// Cash from investing activities
    #[serde(default)]
    pub cash_from_investing: Option<f64>,
    /// Capital expenditure, reported as a negative outflow
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Share-based compensation
    #[serde(default)]
    pub share_based_comp: Option<f64>,

    // Balance Sheet Items
    /// Total assets
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Total liabilities
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    /// Stockholders' equity
    #[serde(default)]
    pub stockholders_equity: Option<f64>,
    /// Long-term debt
    #[serde(default)]
    pub long_term_debt: Option<f64>,

    // Share Information
    /// Common shares outstanding
    #[serde(default)]
    pub shares_outstanding: Option<f64>,

    /// Date the record was last refreshed by its source
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl FinancialMetric {
    /// Create a record holding only the income statement amounts.
    pub fn new(
        ticker: impl Into<String>,
        year: i32,
        revenue: f64,
        gross_profit: f64,
        operating_income: f64,
        net_income: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            year,
            revenue,
            gross_profit,
            operating_income,
            net_income,
            cash_from_operations: None,
            cash_from_financing: None,
            cash_from_investing: None,
            capital_expenditure: None,
            share_based_comp: None,
            total_assets: None,
            total_liabilities: None,
            stockholders_equity: None,
            long_term_debt: None,
            shares_outstanding: None,
            last_updated: None,
        }
    }

    /// Free cash flow (operating cash flow plus the negative capex outflow).
    pub fn free_cash_flow(&self) -> Option<f64> {
        match (self.cash_from_operations, self.capital_expenditure) {
            (Some(ocf), Some(capex)) => Some(ocf + capex),
            _ => None,
        }
    }

    /// Check that every amount present is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] naming the first `NaN` or infinite field.
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("revenue", Some(self.revenue)),
            ("gross_profit", Some(self.gross_profit)),
            ("operating_income", Some(self.operating_income)),
            ("net_income", Some(self.net_income)),
            ("cash_from_operations", self.cash_from_operations),
            ("cash_from_financing", self.cash_from_financing),
            ("cash_from_investing", self.cash_from_investing),
            ("capital_expenditure", self.capital_expenditure),
            ("share_based_comp", self.share_based_comp),
            ("total_assets", self.total_assets),
            ("total_liabilities", self.total_liabilities),
            ("stockholders_equity", self.stockholders_equity),
            ("long_term_debt", self.long_term_debt),
            ("shares_outstanding", self.shares_outstanding),
        ];

        for (field, value) in amounts {
            if let Some(v) = value.filter(|v| !v.is_finite()) {
                return Err(DataError::Parse(format!(
                    "{} {}: {} is not a finite amount ({})",
                    self.ticker, self.year, field, v
                )));
            }
        }
        Ok(())
    }
}

/// Return the record with the most recent fiscal year.
pub fn latest(metrics: &[FinancialMetric]) -> Option<&FinancialMetric> {
    metrics.iter().max_by_key(|m| m.year)
}

/// Normalize a user-supplied ticker.
///
/// Trims surrounding whitespace and uppercases. Tickers must be non-empty and
/// contain only ASCII letters, digits, `.` or `-` (e.g. `BRK.B`, `RDS-A`).
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();

    if ticker.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }

    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(DataError::InvalidSymbol(raw.to_string()));
    }

    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_free_cash_flow() {
        let mut metric = FinancialMetric::new("MSFT", 2021, 168_088.0, 115_856.0, 69_916.0, 61_271.0);
        assert_eq!(metric.free_cash_flow(), None);

        metric.cash_from_operations = Some(76_740.0);
        metric.capital_expenditure = Some(-20_716.0);
        assert_eq!(metric.free_cash_flow(), Some(56_024.0));
    }

    #[test]
    fn test_latest_picks_greatest_year() {
        let metrics = vec![
            FinancialMetric::new("AAPL", 2021, 3.0, 1.0, 1.0, 1.0),
            FinancialMetric::new("AAPL", 2023, 4.0, 1.0, 1.0, 1.0),
            FinancialMetric::new("AAPL", 2022, 5.0, 1.0, 1.0, 1.0),
        ];

        assert_eq!(latest(&metrics).map(|m| m.year), Some(2023));
        assert!(latest(&[]).is_none());
    }

    #[rstest]
    #[case(f64::NAN, None)]
    #[case(f64::INFINITY, None)]
    #[case(100.0, Some(f64::NEG_INFINITY))]
    fn test_validate_rejects_non_finite(#[case] revenue: f64, #[case] total_assets: Option<f64>) {
        let metric = FinancialMetric {
            total_assets,
            ..FinancialMetric::new("ACME", 2021, revenue, 40.0, 15.0, 10.0)
        };
        assert!(matches!(metric.validate(), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_validate_accepts_negative_and_absent_amounts() {
        let metric = FinancialMetric {
            capital_expenditure: Some(-20_716.0),
            ..FinancialMetric::new("ACME", 2021, 100.0, -5.0, -15.0, -10.0)
        };
        assert!(metric.validate().is_ok());
    }

    #[rstest]
    #[case("aapl", "AAPL")]
    #[case("  msft ", "MSFT")]
    #[case("brk.b", "BRK.B")]
    #[case("rds-a", "RDS-A")]
    fn test_normalize_ticker(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_ticker(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("AA PL")]
    #[case("../etc")]
    fn test_normalize_ticker_rejects(#[case] raw: &str) {
        assert!(matches!(
            normalize_ticker(raw),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_deserialize_with_optional_fields_missing() {
        let json = r#"{
            "ticker": "AAPL",
            "year": 2022,
            "revenue": 394328000000,
            "gross_profit": 170782000000,
            "operating_income": 119437000000,
            "net_income": 99803000000,
            "last_updated": "2023-01-01"
        }"#;

        let metric: FinancialMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.year, 2022);
        assert_eq!(metric.revenue, 394_328_000_000.0);
        assert!(metric.total_assets.is_none());
        assert_eq!(metric.last_updated, NaiveDate::from_ymd_opt(2023, 1, 1));
    }

    #[test]
    fn test_deserialize_rejects_string_year() {
        let json = r#"{
            "ticker": "GOOG",
            "year": "2021",
            "revenue": 1,
            "gross_profit": 1,
            "operating_income": 1,
            "net_income": 1
        }"#;

        assert!(serde_json::from_str::<FinancialMetric>(json).is_err());
    }
}

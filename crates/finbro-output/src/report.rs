//! Growth reports.

use crate::export::{ExportError, ExportFormat, Exporter, rows_to_csv};
use chrono::{DateTime, Utc};
use finbro_metrics::{GrowthEntry, ProfitabilitySnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required builder field was never set.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),
}

/// Growth analysis for one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthReport {
    /// Ticker being analyzed.
    pub ticker: String,

    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Number of annual records the report was built from.
    pub record_count: usize,

    /// Earliest fiscal year in the input.
    pub first_year: Option<i32>,

    /// Latest fiscal year in the input.
    pub last_year: Option<i32>,

    /// Profitability of the most recent year.
    pub latest: Option<ProfitabilitySnapshot>,

    /// Year-over-year growth, ascending by year.
    pub growth: Vec<GrowthEntry>,
}

impl GrowthReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether there was enough history to compute any growth.
    pub fn has_growth(&self) -> bool {
        !self.growth.is_empty()
    }

    /// Render the report as a plain-text table.
    pub fn to_text_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nGrowth Report: {}\n", self.ticker));
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => output.push_str(&format!(
                "Years: {} to {} ({} records)\n",
                first, last, self.record_count
            )),
            _ => output.push_str("Years: none\n"),
        }
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if let Some(latest) = &self.latest {
            output.push_str(&format!("Most recent year: {}\n", latest.year));
            output.push_str(&format!(
                "  {:<20} {:>20}\n",
                "Revenue",
                format_amount(latest.revenue)
            ));
            output.push_str(&format!(
                "  {:<20} {:>20}\n",
                "Net Income",
                format_amount(latest.net_income)
            ));
            output.push_str(&format!(
                "  {:<20} {:>20}\n",
                "Operating Margin",
                format_percent(latest.operating_margin)
            ));
            output.push_str(&format!(
                "  {:<20} {:>20}\n",
                "Return on Equity",
                format_percent(latest.return_on_equity)
            ));
            output.push_str(&"-".repeat(80));
            output.push('\n');
        }

        if self.growth.is_empty() {
            output.push_str("Need at least two years of data to calculate growth rates\n");
            return output;
        }

        output.push_str(&format!(
            "{:<6} {:>13} {:>13} {:>13} {:>13} {:>13}\n",
            "Year", "Revenue", "Net Income", "Gross Mgn", "Op Mgn", "Net Mgn"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for entry in &self.growth {
            output.push_str(&format!(
                "{:<6} {:>13} {:>13} {:>13} {:>13} {:>13}\n",
                entry.year,
                format_percent(Some(entry.revenue_growth)),
                format_percent(entry.net_income_growth),
                format_percent(entry.gross_margin),
                format_percent(entry.operating_margin),
                format_percent(entry.net_margin),
            ));
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');
        output
    }
}

impl Exporter for GrowthReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(&self.growth),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Format a percentage with two decimals, `n/a` when absent.
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"))
}

/// Format an amount with thousands separators and no decimals.
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 && rounded != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Builder for creating growth reports.
#[derive(Debug, Default)]
pub struct GrowthReportBuilder {
    ticker: Option<String>,
    years: Vec<i32>,
    latest: Option<ProfitabilitySnapshot>,
    growth: Vec<GrowthEntry>,
}

impl GrowthReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticker.
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Set the fiscal years of the input records.
    pub fn record_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    /// Set the most recent year's snapshot.
    pub fn latest(mut self, latest: Option<ProfitabilitySnapshot>) -> Self {
        self.latest = latest;
        self
    }

    /// Set the growth entries.
    pub fn growth(mut self, growth: Vec<GrowthEntry>) -> Self {
        self.growth = growth;
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<GrowthReport, ReportError> {
        let ticker = self.ticker.ok_or(ReportError::MissingField("ticker"))?;

        Ok(GrowthReport {
            ticker,
            generated_at: Utc::now(),
            record_count: self.years.len(),
            first_year: self.years.iter().copied().min(),
            last_year: self.years.iter().copied().max(),
            latest: self.latest,
            growth: self.growth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn growth_entry(year: i32) -> GrowthEntry {
        GrowthEntry {
            ticker: "MSFT".to_string(),
            year,
            revenue_growth: 17.53,
            net_income_growth: Some(38.37),
            gross_margin: Some(68.93),
            operating_margin: Some(41.59),
            net_margin: None,
        }
    }

    #[test]
    fn test_report_builder() {
        let report = GrowthReportBuilder::new()
            .ticker("MSFT")
            .record_years([2021, 2019, 2020])
            .growth(vec![growth_entry(2020), growth_entry(2021)])
            .build()
            .unwrap();

        assert_eq!(report.ticker, "MSFT");
        assert_eq!(report.record_count, 3);
        assert_eq!(report.first_year, Some(2019));
        assert_eq!(report.last_year, Some(2021));
        assert!(report.has_growth());
        assert!(report.latest.is_none());
    }

    #[test]
    fn test_report_builder_requires_ticker() {
        let result = GrowthReportBuilder::new().build();
        assert!(matches!(result, Err(ReportError::MissingField("ticker"))));
    }

    #[test]
    fn test_text_table_without_history() {
        let report = GrowthReportBuilder::new()
            .ticker("NEWCO")
            .record_years([2024])
            .build()
            .unwrap();

        let text = report.to_text_table();
        assert!(text.contains("Growth Report: NEWCO"));
        assert!(text.contains("Need at least two years"));
    }

    #[test]
    fn test_text_table_rows() {
        let report = GrowthReportBuilder::new()
            .ticker("MSFT")
            .record_years([2020, 2021])
            .growth(vec![growth_entry(2021)])
            .build()
            .unwrap();

        let text = report.to_text_table();
        assert!(text.contains("17.53%"));
        assert!(text.contains("38.37%"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_report_json_roundtrip_fields() {
        let report = GrowthReportBuilder::new()
            .ticker("MSFT")
            .record_years([2020, 2021])
            .growth(vec![growth_entry(2021)])
            .build()
            .unwrap();

        let json = report.to_json().unwrap();
        assert!(json.contains("\"ticker\": \"MSFT\""));
        assert!(json.contains("\"generated_at\""));

        let csv = report.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("ticker,year,revenue_growth"));
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1_000.0, "1,000")]
    #[case(394_328_000_000.0, "394,328,000,000")]
    #[case(-38_704_000_000.0, "-38,704,000,000")]
    #[case(-0.4, "0")]
    fn test_format_amount(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_amount(value), expected);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(50.0)), "50.00%");
        assert_eq!(format_percent(Some(-7.126)), "-7.13%");
        assert_eq!(format_percent(None), "n/a");
    }
}

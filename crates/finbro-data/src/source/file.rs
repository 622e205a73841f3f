//! Directory-backed record source.
//!
//! Records for a ticker live in `<root>/<TICKER>.json` (an array of records)
//! or `<root>/<TICKER>.csv` (one record per row with a header line). JSON is
//! preferred when both exist.

use super::MetricsSource;
use crate::error::{DataError, Result};
use crate::metric::{FinancialMetric, normalize_ticker};
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk encoding of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// JSON array of records
    Json,
    /// CSV with a header row
    Csv,
}

impl RecordFormat {
    /// Formats in lookup order.
    pub const ALL: [Self; 2] = [Self::Json, Self::Csv];

    /// File extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Decode records from file contents.
    pub fn parse(&self, contents: &str) -> Result<Vec<FinancialMetric>> {
        match self {
            Self::Json => parse_json(contents),
            Self::Csv => parse_csv(contents),
        }
    }
}

/// Decode a JSON array of records.
pub fn parse_json(contents: &str) -> Result<Vec<FinancialMetric>> {
    let records: Vec<FinancialMetric> = serde_json::from_str(contents)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Decode CSV rows into records. Empty optional cells decode as absent.
pub fn parse_csv(contents: &str) -> Result<Vec<FinancialMetric>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<FinancialMetric>() {
        let record = row?;
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

/// Reads per-ticker record files from a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a ticker's records would have in the given format.
    pub fn path_for(&self, ticker: &str, format: RecordFormat) -> PathBuf {
        self.root.join(format!("{}.{}", ticker, format.extension()))
    }

    /// Load records from an explicit file, inferring its format from the extension.
    pub async fn load_file(path: &Path) -> Result<Vec<FinancialMetric>> {
        let format = RecordFormat::from_path(path).ok_or_else(|| {
            DataError::Parse(format!("Unsupported record file: {}", path.display()))
        })?;
        let contents = tokio::fs::read_to_string(path).await?;
        format.parse(&contents)
    }
}

impl MetricsSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_metrics(&self, ticker: &str) -> Result<Vec<FinancialMetric>> {
        let ticker = normalize_ticker(ticker)?;

        for format in RecordFormat::ALL {
            let path = self.path_for(&ticker, format);
            if !tokio::fs::try_exists(&path).await? {
                continue;
            }

            let contents = tokio::fs::read_to_string(&path).await?;
            let records = format.parse(&contents)?;
            debug!(
                ticker = %ticker,
                path = %path.display(),
                records = records.len(),
                "Loaded financial records"
            );
            return Ok(records);
        }

        Err(DataError::MissingData {
            symbol: ticker.clone(),
            reason: format!(
                "no {ticker}.json or {ticker}.csv in {}",
                self.root.display()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format_from_path() {
        assert_eq!(
            RecordFormat::from_path(Path::new("data/AAPL.json")),
            Some(RecordFormat::Json)
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("AAPL.CSV")),
            Some(RecordFormat::Csv)
        );
        assert_eq!(RecordFormat::from_path(Path::new("AAPL.xlsx")), None);
        assert_eq!(RecordFormat::from_path(Path::new("AAPL")), None);
    }

    #[test]
    fn test_parse_csv_with_blank_optional_cells() {
        let csv = "\
ticker,year,revenue,gross_profit,operating_income,net_income,total_assets,last_updated
AAPL,2021,365817,152836,108949,94680,351002,2022-01-01
AAPL,2022,394328,170782,119437,99803,,
";
        let records = parse_csv(csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_assets, Some(351_002.0));
        assert!(records[1].total_assets.is_none());
        assert!(records[1].last_updated.is_none());
        assert_eq!(records[1].net_income, 99_803.0);
    }

    #[test]
    fn test_parse_csv_missing_required_column() {
        let csv = "\
ticker,year,revenue,gross_profit,net_income
AMZN,2021,469822,197478,33364
";
        assert!(matches!(parse_csv(csv), Err(DataError::Csv(_))));
    }

    #[test]
    fn test_parse_csv_rejects_non_finite_amounts() {
        let csv = "\
ticker,year,revenue,gross_profit,operating_income,net_income
ACME,2020,NaN,40,15,10
ACME,2021,150,60,30,inf
";
        assert!(matches!(parse_csv(csv), Err(DataError::Parse(_))));

        let csv = "\
ticker,year,revenue,gross_profit,operating_income,net_income,total_assets
ACME,2021,150,60,30,20,-inf
";
        assert!(matches!(parse_csv(csv), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_parse_json_rejects_overflowing_amount() {
        let json = r#"[{
            "ticker": "ACME",
            "year": 2021,
            "revenue": 1e400,
            "gross_profit": 60,
            "operating_income": 30,
            "net_income": 20
        }]"#;
        assert!(parse_json(json).is_err());
    }

    #[test]
    fn test_parse_json_rejects_object() {
        let json = r#"{"ticker": "AAPL"}"#;
        assert!(matches!(
            parse_json(json),
            Err(DataError::Serialization(_))
        ));
    }

    #[test]
    fn test_path_for() {
        let source = FileSource::new("/data");
        assert_eq!(source.root(), Path::new("/data"));
        assert_eq!(
            source.path_for("AAPL", RecordFormat::Csv),
            PathBuf::from("/data/AAPL.csv")
        );
    }
}

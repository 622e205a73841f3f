//! finbro CLI binary.
//!
//! Provides a command-line interface for year-over-year growth analysis of
//! annual financial records stored as per-ticker JSON or CSV files.

mod config;

use clap::{Parser, Subcommand};
use finbro::data::{MetricsSource, latest};
use finbro::metrics::{MetricCategory, ProfitabilitySnapshot, available_metrics, metrics_by_category};
use finbro::output::{ExportFormat, Exporter, format_amount, format_percent};
use finbro::{DEFAULT_CONCURRENCY, FileSource, GrowthEntry, GrowthReport, analyze_many};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "finbro")]
#[command(about = "finbro: growth analysis of annual financial records", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding <TICKER>.json or <TICKER>.csv record files
    #[arg(long, global = true, env = "FINBRO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute year-over-year growth for one or more tickers
    Growth {
        /// Stock tickers
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Output format (text, csv, json or pretty-json); inferred from
        /// the --output extension when omitted
        #[arg(long)]
        format: Option<String>,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum number of tickers loaded at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// Show profitability for the most recent fiscal year
    Latest {
        /// Stock ticker
        ticker: String,

        /// Output format (text, csv, json or pretty-json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the metrics finbro computes
    Metrics {
        /// Filter by category (growth, margin or profitability)
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    config::init_tracing(cli.verbose);

    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref());
    debug!(data_dir = %data_dir.display(), "Resolved data directory");

    match cli.command {
        Commands::Growth {
            tickers,
            format,
            output,
            concurrency,
        } => {
            let format = resolve_format(format.as_deref(), output.as_deref())?;
            growth(&data_dir, &tickers, format, output.as_deref(), concurrency).await?;
        }
        Commands::Latest { ticker, format } => {
            let format = parse_format(&format)?;
            show_latest(&data_dir, &ticker, format).await?;
        }
        Commands::Metrics { category } => {
            list_metrics(category.as_deref())?;
        }
    }

    Ok(())
}

/// `None` selects the text rendering.
fn parse_format(raw: &str) -> Result<Option<ExportFormat>, Box<dyn std::error::Error>> {
    if raw.eq_ignore_ascii_case("text") {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

/// Explicit `--format` wins; otherwise `.csv`/`.json` outputs pick their format.
fn resolve_format(
    raw: Option<&str>,
    output: Option<&Path>,
) -> Result<Option<ExportFormat>, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => parse_format(raw),
        None => Ok(output.and_then(ExportFormat::from_path)),
    }
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "Wrote output");
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn growth(
    data_dir: &Path,
    tickers: &[String],
    format: Option<ExportFormat>,
    output: Option<&Path>,
    concurrency: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = FileSource::new(data_dir);
    debug!(
        root = %source.root().display(),
        tickers = tickers.len(),
        "Analyzing tickers"
    );
    let results = analyze_many(&source, tickers, concurrency).await;

    let mut reports: Vec<GrowthReport> = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (ticker, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: {}: {}", ticker, e);
                failed += 1;
            }
        }
    }

    let content = match format {
        None => reports
            .iter()
            .map(GrowthReport::to_text_table)
            .collect::<String>(),
        Some(ExportFormat::Csv) => {
            let entries: Vec<GrowthEntry> = reports
                .iter()
                .flat_map(|r| r.growth.iter().cloned())
                .collect();
            entries.export_to_string(ExportFormat::Csv)?
        }
        Some(ExportFormat::Json) => format!("{}\n", serde_json::to_string(&reports)?),
        Some(ExportFormat::PrettyJson) => {
            format!("{}\n", serde_json::to_string_pretty(&reports)?)
        }
    };
    emit(&content, output)?;

    if failed > 0 {
        return Err(format!("{} of {} tickers failed", failed, tickers.len()).into());
    }
    Ok(())
}

async fn show_latest(
    data_dir: &Path,
    ticker: &str,
    format: Option<ExportFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = FileSource::new(data_dir);
    let records = source.fetch_metrics(ticker).await?;

    let Some(most_recent) = latest(&records) else {
        return Err(format!("No records for {}", ticker).into());
    };
    let snapshot = ProfitabilitySnapshot::from_metric(most_recent);

    match format {
        None => {
            println!("\nMost recent data for {} ({}):", snapshot.ticker, snapshot.year);
            println!("  {:<20} {:>20}", "Revenue", format_amount(snapshot.revenue));
            println!("  {:<20} {:>20}", "Net Income", format_amount(snapshot.net_income));
            println!(
                "  {:<20} {:>20}",
                "Operating Margin",
                format_percent(snapshot.operating_margin)
            );
            println!(
                "  {:<20} {:>20}",
                "Return on Equity",
                format_percent(snapshot.return_on_equity)
            );
            println!(
                "  {:<20} {:>20}",
                "Return on Assets",
                format_percent(snapshot.return_on_assets)
            );
            println!(
                "  {:<20} {:>20}",
                "Debt to Equity",
                snapshot
                    .debt_to_equity
                    .map_or_else(|| "n/a".to_string(), |d| format!("{:.2}", d))
            );
            println!(
                "  {:<20} {:>20}",
                "Free Cash Flow",
                snapshot
                    .free_cash_flow
                    .map_or_else(|| "n/a".to_string(), format_amount)
            );
        }
        Some(format) => {
            println!("{}", snapshot.export_to_string(format)?.trim_end());
        }
    }

    Ok(())
}

fn list_metrics(category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = match category {
        Some(name) => metrics_by_category(name.parse::<MetricCategory>()?),
        None => available_metrics(),
    };

    println!("{:<20} {:<14} Description", "Metric", "Category");
    println!("{}", "-".repeat(80));
    for metric in metrics {
        println!(
            "{:<20} {:<14} {}",
            metric.name, metric.category, metric.description
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("text").unwrap(), None);
        assert_eq!(parse_format("TEXT").unwrap(), None);
        assert_eq!(parse_format("csv").unwrap(), Some(ExportFormat::Csv));
        assert_eq!(
            parse_format("pretty-json").unwrap(),
            Some(ExportFormat::PrettyJson)
        );
        assert!(parse_format("yaml").is_err());
    }

    #[test]
    fn test_growth_args() {
        let cli = Cli::try_parse_from([
            "finbro",
            "--data-dir",
            "/tmp/records",
            "growth",
            "AAPL",
            "MSFT",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/records")));
        match cli.command {
            Commands::Growth {
                tickers,
                format,
                concurrency,
                ..
            } => {
                assert_eq!(tickers, vec!["AAPL", "MSFT"]);
                assert_eq!(format.as_deref(), Some("csv"));
                assert_eq!(concurrency, DEFAULT_CONCURRENCY);
            }
            _ => panic!("expected growth command"),
        }
    }

    #[test]
    fn test_resolve_format_from_output_extension() {
        assert_eq!(
            resolve_format(None, Some(Path::new("out/growth.csv"))).unwrap(),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            resolve_format(None, Some(Path::new("growth.json"))).unwrap(),
            Some(ExportFormat::PrettyJson)
        );
        assert_eq!(resolve_format(None, Some(Path::new("growth.txt"))).unwrap(), None);
        assert_eq!(resolve_format(None, None).unwrap(), None);
        assert_eq!(
            resolve_format(Some("json"), Some(Path::new("growth.csv"))).unwrap(),
            Some(ExportFormat::Json)
        );
    }

    #[test]
    fn test_growth_requires_ticker() {
        assert!(Cli::try_parse_from(["finbro", "growth"]).is_err());
    }
}

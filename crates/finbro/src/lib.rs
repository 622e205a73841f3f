#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/finbro/finbro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;

// Re-export main types from sub-crates
pub use finbro_data as data;
pub use finbro_metrics as metrics;
pub use finbro_output as output;

pub use analysis::{AnalysisError, DEFAULT_CONCURRENCY, analyze, analyze_many, build_report};
pub use finbro_data::{FileSource, FinancialMetric, InMemorySource, MetricsSource};
pub use finbro_metrics::{GrowthEntry, GrowthError, compute_growth};
pub use finbro_output::GrowthReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/finbro/finbro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod growth;
pub mod profitability;
pub mod ratio;
pub mod registry;

pub use growth::{GrowthCalculator, GrowthEntry, GrowthError, compute_growth};
pub use profitability::ProfitabilitySnapshot;

// Re-export registry types for convenience
pub use registry::{
    MetricCategory, MetricInfo, available_metrics, get_metric_info, metrics_by_category,
};

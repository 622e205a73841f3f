#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/finbro/finbro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod metric;
pub mod source;

pub use error::{DataError, Result};
pub use metric::{FinancialMetric, latest, normalize_ticker};
pub use source::{FileSource, InMemorySource, MetricsSource, RecordFormat};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

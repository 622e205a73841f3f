#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/finbro/finbro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{GrowthReport, GrowthReportBuilder, ReportError, format_amount, format_percent};

//! Metric Registry
//!
//! Descriptive metadata for every derived metric this crate computes, so
//! front ends can list and document them without hard-coding names.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Available metric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricCategory {
    /// Year-over-year growth (revenue, net income)
    Growth,
    /// Margins on revenue (gross, operating, net)
    Margin,
    /// Single-year profitability and leverage (ROE, ROA, debt-to-equity)
    Profitability,
}

impl MetricCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Growth, Self::Margin, Self::Profitability];

    /// Lowercase category name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Margin => "margin",
            Self::Profitability => "profitability",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for MetricCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown metric category: {s}"))
    }
}

/// Metric metadata
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Metric name (unique identifier, matches the output field name)
    pub name: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Brief description of what the metric measures
    pub description: &'static str,
    /// Record fields the metric reads
    pub required_fields: &'static [&'static str],
}

/// Get all available metric info
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        // Growth metrics
        MetricInfo {
            name: "revenue_growth",
            category: MetricCategory::Growth,
            description: "Year-over-year revenue change (%)",
            required_fields: &["ticker", "year", "revenue"],
        },
        MetricInfo {
            name: "net_income_growth",
            category: MetricCategory::Growth,
            description: "Year-over-year net income change (%), absent if prior net income is zero",
            required_fields: &["ticker", "year", "net_income"],
        },
        // Margin metrics
        MetricInfo {
            name: "gross_margin",
            category: MetricCategory::Margin,
            description: "Gross profit as a share of revenue (%)",
            required_fields: &["ticker", "year", "gross_profit", "revenue"],
        },
        MetricInfo {
            name: "operating_margin",
            category: MetricCategory::Margin,
            description: "Operating income as a share of revenue (%)",
            required_fields: &["ticker", "year", "operating_income", "revenue"],
        },
        MetricInfo {
            name: "net_margin",
            category: MetricCategory::Margin,
            description: "Net income as a share of revenue (%)",
            required_fields: &["ticker", "year", "net_income", "revenue"],
        },
        // Profitability metrics
        MetricInfo {
            name: "return_on_equity",
            category: MetricCategory::Profitability,
            description: "Net income over stockholders' equity (%)",
            required_fields: &["ticker", "year", "net_income", "stockholders_equity"],
        },
        MetricInfo {
            name: "return_on_assets",
            category: MetricCategory::Profitability,
            description: "Net income over total assets (%)",
            required_fields: &["ticker", "year", "net_income", "total_assets"],
        },
        MetricInfo {
            name: "debt_to_equity",
            category: MetricCategory::Profitability,
            description: "Long-term debt over stockholders' equity",
            required_fields: &["ticker", "year", "long_term_debt", "stockholders_equity"],
        },
        MetricInfo {
            name: "free_cash_flow",
            category: MetricCategory::Profitability,
            description: "Cash from operations net of capital expenditure",
            required_fields: &[
                "ticker",
                "year",
                "cash_from_operations",
                "capital_expenditure",
            ],
        },
    ]
}

/// Get metrics by category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

/// Get metric info by name
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.name == name)
}

/// Count metrics by category
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for metric in available_metrics() {
        *counts.entry(metric.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_metrics_count() {
        assert_eq!(available_metrics().len(), 9);
    }

    #[test]
    fn test_count_by_category() {
        let counts = count_by_category();
        assert_eq!(counts.get(&MetricCategory::Growth), Some(&2));
        assert_eq!(counts.get(&MetricCategory::Margin), Some(&3));
        assert_eq!(counts.get(&MetricCategory::Profitability), Some(&4));
    }

    #[test]
    fn test_get_metric_info() {
        let info = get_metric_info("net_margin").unwrap();
        assert_eq!(info.category, MetricCategory::Margin);
        assert!(info.required_fields.contains(&"revenue"));

        assert!(get_metric_info("ebitda").is_none());
    }

    #[test]
    fn test_metrics_by_category() {
        let names: Vec<&str> = metrics_by_category(MetricCategory::Growth)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["revenue_growth", "net_income_growth"]);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Growth".parse::<MetricCategory>(), Ok(MetricCategory::Growth));
        assert_eq!(
            " profitability ".parse::<MetricCategory>(),
            Ok(MetricCategory::Profitability)
        );
        assert!("value".parse::<MetricCategory>().is_err());
    }

    #[test]
    fn test_all_metrics_name_their_record() {
        for metric in available_metrics() {
            assert!(
                metric.required_fields.contains(&"ticker") && metric.required_fields.contains(&"year"),
                "Metric {} must key on ticker and year",
                metric.name
            );
        }
    }
}

//! Year-over-year growth entry.

use crate::ratio::{percent_change, percent_of};
use finbro_data::FinancialMetric;
use serde::{Deserialize, Serialize};

/// Growth and margin figures for one fiscal year relative to the year before.
///
/// All values are percentages. Optional fields are `None` when their
/// denominator was zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    /// Stock ticker
    pub ticker: String,
    /// Fiscal year of the later record in the pair
    pub year: i32,
    /// Revenue change versus the previous year
    pub revenue_growth: f64,
    /// Net income change versus the previous year
    pub net_income_growth: Option<f64>,
    /// Gross profit over revenue
    pub gross_margin: Option<f64>,
    /// Operating income over revenue
    pub operating_margin: Option<f64>,
    /// Net income over revenue
    pub net_margin: Option<f64>,
}

impl GrowthEntry {
    /// Compute the entry for `current` against `previous`.
    ///
    /// Returns `None` when the previous year's revenue is zero; the pair is
    /// then skipped entirely rather than partially filled.
    pub fn between(previous: &FinancialMetric, current: &FinancialMetric) -> Option<Self> {
        let revenue_growth = percent_change(previous.revenue, current.revenue)?;

        Some(Self {
            ticker: current.ticker.clone(),
            year: current.year,
            revenue_growth,
            net_income_growth: percent_change(previous.net_income, current.net_income),
            gross_margin: percent_of(current.gross_profit, current.revenue),
            operating_margin: percent_of(current.operating_income, current.revenue),
            net_margin: percent_of(current.net_income, current.revenue),
        })
    }
}

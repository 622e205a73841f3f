//! Single-year profitability snapshot.

use crate::ratio::percent_of;
use finbro_data::FinancialMetric;
use serde::{Deserialize, Serialize};

/// Profitability and leverage ratios for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilitySnapshot {
    /// Stock ticker
    pub ticker: String,
    /// Fiscal year
    pub year: i32,
    /// Revenue
    pub revenue: f64,
    /// Net income
    pub net_income: f64,
    /// Operating income over revenue (%)
    pub operating_margin: Option<f64>,
    /// Net income over stockholders' equity (%)
    pub return_on_equity: Option<f64>,
    /// Net income over total assets (%)
    pub return_on_assets: Option<f64>,
    /// Long-term debt over stockholders' equity
    pub debt_to_equity: Option<f64>,
    /// Operating cash flow net of capital expenditure
    pub free_cash_flow: Option<f64>,
}

impl ProfitabilitySnapshot {
    /// Compute the snapshot for a record.
    ///
    /// Equity- and asset-based ratios require a positive denominator; a
    /// negative book value makes them meaningless.
    pub fn from_metric(metric: &FinancialMetric) -> Self {
        let equity = metric.stockholders_equity.filter(|eq| *eq > 0.0);
        let assets = metric.total_assets.filter(|a| *a > 0.0);

        let return_on_equity = equity.and_then(|eq| percent_of(metric.net_income, eq));
        let return_on_assets = assets.and_then(|a| percent_of(metric.net_income, a));

        let debt_to_equity = match (metric.long_term_debt, equity) {
            (Some(debt), Some(eq)) => Some(debt / eq),
            _ => None,
        };

        Self {
            ticker: metric.ticker.clone(),
            year: metric.year,
            revenue: metric.revenue,
            net_income: metric.net_income,
            operating_margin: percent_of(metric.operating_income, metric.revenue),
            return_on_equity,
            return_on_assets,
            debt_to_equity,
            free_cash_flow: metric.free_cash_flow(),
        }
    }
}

impl From<&FinancialMetric> for ProfitabilitySnapshot {
    fn from(metric: &FinancialMetric) -> Self {
        Self::from_metric(metric)
    }
}

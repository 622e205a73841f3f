//! Guarded percentage helpers.
//!
//! A zero denominator yields `None`, never `NaN`, infinity or a zero
//! placeholder, so "no data" stays distinguishable from "no change".

/// Percentage change from `previous` to `current`.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// `part` as a percentage of `whole`.
pub fn percent_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    Some(part / whole * 100.0)
}

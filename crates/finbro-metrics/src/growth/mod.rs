//! Growth metrics - year-over-year change between consecutive fiscal years
//!
//! Revenue and net income growth are measured against the prior year, while
//! gross, operating and net margins are taken on the later year's revenue.

pub mod calculator;
pub mod entry;

pub use calculator::{GrowthCalculator, GrowthError, compute_growth};
pub use entry::GrowthEntry;

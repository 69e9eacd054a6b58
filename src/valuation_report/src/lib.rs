//! Percentile and temperature reports over stored index valuation series.
//!
//! Both reports share one driver ([`report::run_report`]) and differ only in
//! the statistic they derive from the PE and PB columns ([`report::Analysis`]).

#![deny(missing_docs)]

pub mod dates;
pub mod percentile;
pub mod report;
pub mod series;
pub mod stats;
pub mod temperature;

pub use percentile::Percentile;
pub use report::{Analysis, ReportSummary, run_report};
pub use temperature::Temperature;

//! Stored series as the reporters see them.

use std::path::Path;

use anyhow::Context;
use metrics_ingestor::{io::load_series, models::metric::MetricRecord};

/// One record that carries both valuation metrics a report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationPoint {
    /// RFC-3339 timestamp, copied from the record.
    pub date: String,
    /// Index closing level, if the provider sent it.
    pub close_point: Option<f64>,
    /// Total market value, if the provider sent it.
    pub market_value: Option<f64>,
    /// Weighted-average trailing PE.
    pub pe: f64,
    /// Weighted-average PB.
    pub pb: f64,
    /// Weighted-average trailing PS, if present.
    pub ps: Option<f64>,
}

impl ValuationPoint {
    /// `None` unless the record has both a PE and a PB weighted average.
    pub fn from_record(record: &MetricRecord) -> Option<Self> {
        Some(Self {
            date: record.date.clone(),
            close_point: record.close_point(),
            market_value: record.market_value(),
            pe: record.pe()?,
            pb: record.pb()?,
            ps: record.ps(),
        })
    }
}

/// Keeps the complete records, in stored order.
pub fn filter_complete(records: &[MetricRecord]) -> Vec<ValuationPoint> {
    records.iter().filter_map(ValuationPoint::from_record).collect()
}

/// Loads a data file and filters it. `Ok(None)` when the file does not exist.
pub fn load_points(path: &Path) -> anyhow::Result<Option<Vec<ValuationPoint>>> {
    let records =
        load_series(path).with_context(|| format!("reading series {}", path.display()))?;
    Ok(records.map(|r| filter_complete(&r)))
}

//! Whole-series percentile rank of PE and PB.

use crate::{report::Analysis, series::ValuationPoint, stats::percentile_ranks};

/// Ranks every point's PE and PB against the full stored history.
#[derive(Debug, Clone, Copy, Default)]
pub struct Percentile;

impl Analysis for Percentile {
    fn name(&self) -> &'static str {
        "percentile"
    }

    fn stat_headers(&self) -> &'static [&'static str] {
        &["pe_percent", "pb_percent"]
    }

    fn compute(&self, points: &[ValuationPoint]) -> Vec<Vec<f64>> {
        let pes: Vec<f64> = points.iter().map(|p| p.pe).collect();
        let pbs: Vec<f64> = points.iter().map(|p| p.pb).collect();

        percentile_ranks(&pes)
            .into_iter()
            .zip(percentile_ranks(&pbs))
            .map(|(pe, pb)| vec![pe, pb])
            .collect()
    }
}

//! Expanding-window "temperature" of PE and PB, plus their mean.

use crate::{report::Analysis, series::ValuationPoint, stats::temperatures};

/// Scores every point against the history up to and including itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Temperature;

impl Analysis for Temperature {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn stat_headers(&self) -> &'static [&'static str] {
        &["pe_temp", "pb_temp", "(pe_temp+pb_temp)/2"]
    }

    fn compute(&self, points: &[ValuationPoint]) -> Vec<Vec<f64>> {
        let pes: Vec<f64> = points.iter().map(|p| p.pe).collect();
        let pbs: Vec<f64> = points.iter().map(|p| p.pb).collect();

        temperatures(&pes)
            .into_iter()
            .zip(temperatures(&pbs))
            .map(|(pe, pb)| vec![pe, pb, (pe + pb) / 2.0])
            .collect()
    }
}

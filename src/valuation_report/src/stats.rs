//! The two statistics the reports are built on.
//!
//! - [`percentile_ranks`]: weak percentile-of-score of every value against the
//!   whole series. Ties count as "at or below", so the maximum always scores 100
//!   and a series of N values scores within `[100/N, 100]`.
//! - [`temperatures`]: normal-CDF score of every value against the expanding
//!   history up to and including itself, using the population standard
//!   deviation. A history with no spread scores 50 at its mean.

use statrs::distribution::{ContinuousCDF, Normal};

/// `100 * count(v <= x) / len(series)`. Zero for an empty series.
pub fn percentile_rank(x: f64, series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let at_or_below = series.iter().filter(|v| **v <= x).count();
    100.0 * at_or_below as f64 / series.len() as f64
}

/// [`percentile_rank`] of every element against the full series, in order.
pub fn percentile_ranks(series: &[f64]) -> Vec<f64> {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = series.len() as f64;

    series
        .iter()
        .map(|x| 100.0 * sorted.partition_point(|v| v <= x) as f64 / n)
        .collect()
}

/// Normal-CDF score of `x` under `N(mean, std_dev)`, in percent.
pub fn temperature(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 {
        if let Ok(normal) = Normal::new(mean, std_dev) {
            return 100.0 * normal.cdf(x);
        }
    }
    // Degenerate distribution: a step at the mean.
    if x == mean {
        50.0
    } else if x < mean {
        0.0
    } else {
        100.0
    }
}

/// Expanding-window temperature of every element, in order.
///
/// Mean and population variance are accumulated with Welford's update so a
/// constant prefix has exactly zero spread.
pub fn temperatures(series: &[f64]) -> Vec<f64> {
    let mut mean = 0.0;
    let mut m2 = 0.0;

    series
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let n = (i + 1) as f64;
            let delta = x - mean;
            mean += delta / n;
            m2 += delta * (x - mean);
            temperature(x, mean, (m2 / n).sqrt())
        })
        .collect()
}

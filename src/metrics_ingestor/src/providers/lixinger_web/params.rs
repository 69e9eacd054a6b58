use serde::Serialize;

use crate::providers::EXPECTED_METRICS;

/// Sampling frequency of the returned series.
#[derive(Clone, Copy, Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateFlag {
    #[default]
    Day,
}

/// Look-back span the chart is computed over.
#[derive(Clone, Copy, Debug, Serialize, Default, PartialEq, Eq)]
pub enum Granularity {
    #[default]
    #[serde(rename = "y_10")]
    TenYears,
}

/// Which aggregate of each metric to return.
#[derive(Clone, Copy, Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MetricType {
    #[default]
    WeightedAvg,
}

/// Body of a `price-metrics/load` request.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceMetricsRequest<'a> {
    pub stock_ids: Vec<&'a str>,
    pub date_flag: DateFlag,
    pub granularity: Granularity,
    pub metric_names: &'static [&'static str],
    pub metric_types: Vec<MetricType>,
}

impl<'a> PriceMetricsRequest<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            stock_ids: vec![code],
            date_flag: DateFlag::default(),
            granularity: Granularity::default(),
            metric_names: &EXPECTED_METRICS,
            metric_types: vec![MetricType::default()],
        }
    }
}

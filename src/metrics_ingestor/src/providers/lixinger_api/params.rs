use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::providers::EXPECTED_METRICS;

/// How far back the open API window reaches.
pub const LOOKBACK_DAYS: i64 = 365 * 5;

/// Body of a `fundamental-info` request.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalInfoRequest<'a> {
    pub token: &'a str,
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: String,
    pub stock_codes: Vec<&'a str>,
    pub metrics: &'static [&'static str],
}

impl<'a> FundamentalInfoRequest<'a> {
    pub fn new(token: &'a str, code: &'a str, today: NaiveDate) -> Self {
        Self {
            token,
            start_date: start_date(today).format("%Y-%m-%d").to_string(),
            stock_codes: vec![code],
            metrics: &EXPECTED_METRICS,
        }
    }
}

/// First day of the window: five 365-day years before `today`.
pub fn start_date(today: NaiveDate) -> NaiveDate {
    today - Duration::days(LOOKBACK_DAYS)
}

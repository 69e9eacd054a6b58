//! Canonical representation of one day of index valuation metrics.
//!
//! Records are stored exactly as the provider returns them. The typed fields
//! cover what the reporters read; everything else lands in the flattened
//! `extra` maps so a stored file survives a load/save cycle unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// A field that keeps "absent", `null` and a value apart.
///
/// `None` is a missing key, `Some(None)` an explicit `null`. Both are written
/// back exactly as they were read.
pub type Nullable<T> = Option<Option<T>>;

fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A present, non-null number. `NaN` and infinities become `null`.
pub fn present(value: f64) -> Nullable<Number> {
    Some(Number::from_f64(value))
}

fn as_f64(field: &Nullable<Number>) -> Option<f64> {
    field.as_ref()?.as_ref()?.as_f64()
}

/// A nested valuation metric, e.g. `{"weightedAvg": 13.2}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Cap-weighted average across the index constituents.
    #[serde(
        rename = "weightedAvg",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub weighted_avg: Nullable<Number>,

    /// Any other aggregate the provider sent alongside (median, etc.).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetricValue {
    pub fn weighted(value: f64) -> Self {
        Self {
            weighted_avg: present(value),
            extra: Map::new(),
        }
    }

    pub fn weighted_avg(&self) -> Option<f64> {
        as_f64(&self.weighted_avg)
    }
}

/// One time-stamped observation for an index.
///
/// Numbers are kept as [`Number`] so integers stay integers on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// ISO-8601 UTC timestamp as sent by the provider
    /// (e.g. `"2023-06-01T00:00:00.000Z"`).
    pub date: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub close_point: Nullable<Number>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub market_value: Nullable<Number>,

    /// Trailing-twelve-month price/earnings.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub pe_ttm: Nullable<MetricValue>,

    /// Price/book.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub pb: Nullable<MetricValue>,

    /// Trailing-twelve-month price/sales.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub ps_ttm: Nullable<MetricValue>,

    /// Dividend ratio.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub dividend_r: Nullable<MetricValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn weighted(metric: &Nullable<MetricValue>) -> Option<f64> {
    metric.as_ref()?.as_ref()?.weighted_avg()
}

impl MetricRecord {
    /// Parses [`date`](Self::date) as RFC 3339 and converts it to UTC.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.date).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn close_point(&self) -> Option<f64> {
        as_f64(&self.close_point)
    }

    pub fn market_value(&self) -> Option<f64> {
        as_f64(&self.market_value)
    }

    pub fn pe(&self) -> Option<f64> {
        weighted(&self.pe_ttm)
    }

    pub fn pb(&self) -> Option<f64> {
        weighted(&self.pb)
    }

    pub fn ps(&self) -> Option<f64> {
        weighted(&self.ps_ttm)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_provider_record_and_keeps_unknown_fields() {
        let raw = json!({
            "date": "2023-06-01T00:00:00.000Z",
            "stockId": 10000000905u64,
            "close_point": 6012.5,
            "market_value": 1.2e13,
            "pe_ttm": {"weightedAvg": 21.7, "median": 30.1},
            "pb": {"weightedAvg": 1.9},
            "dividend_r": {"weightedAvg": 0.015}
        });

        let record: MetricRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.pe(), Some(21.7));
        assert_eq!(record.pb(), Some(1.9));
        assert_eq!(record.ps(), None);
        assert_eq!(record.extra.get("stockId"), Some(&json!(10000000905u64)));
        assert_eq!(
            record.pe_ttm.clone().flatten().unwrap().extra.get("median"),
            Some(&json!(30.1))
        );

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn nulls_and_integers_survive_a_round_trip() {
        let raw = json!({
            "date": "2023-01-01T00:00:00.000Z",
            "close_point": null,
            "market_value": 2600,
            "pe_ttm": null,
            "pb": {"weightedAvg": null},
            "ps_ttm": {"weightedAvg": 3}
        });

        let record: MetricRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.close_point, Some(None));
        assert_eq!(record.close_point(), None);
        assert_eq!(record.market_value(), Some(2600.0));
        assert_eq!(record.pe_ttm, Some(None));
        assert_eq!(record.pb(), None);
        assert_eq!(record.ps(), Some(3.0));
        assert_eq!(record.dividend_r, None);

        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"date":"2023-01-01T00:00:00.000Z","close_point":null,"market_value":2600,"pe_ttm":null,"pb":{"weightedAvg":null},"ps_ttm":{"weightedAvg":3}}"#
        );
    }

    #[test]
    fn non_finite_value_is_written_as_null() {
        assert_eq!(MetricValue::weighted(f64::NAN).weighted_avg, Some(None));
    }

    #[test]
    fn absent_metrics_stay_absent_on_write() {
        let record = MetricRecord {
            date: "2023-01-01T00:00:00.000Z".into(),
            ..Default::default()
        };
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"date":"2023-01-01T00:00:00.000Z"}"#);
    }

    #[test]
    fn timestamp_handles_fraction_and_offset() {
        let utc = MetricRecord {
            date: "2023-06-01T00:00:00.000Z".into(),
            ..Default::default()
        };
        let shifted = MetricRecord {
            date: "2023-06-01T08:00:00+08:00".into(),
            ..Default::default()
        };
        let expected = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(utc.timestamp().unwrap(), expected);
        assert_eq!(shifted.timestamp().unwrap(), expected);
    }

    #[test]
    fn unparsable_date_is_an_error() {
        let record = MetricRecord {
            date: "yesterday".into(),
            ..Default::default()
        };
        assert!(record.timestamp().is_err());
    }
}

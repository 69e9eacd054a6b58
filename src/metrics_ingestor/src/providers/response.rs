//! Response handling shared by both endpoints.

use reqwest::Response;
use serde_json::Value;
use snafu::ResultExt;

use crate::{
    models::metric::MetricRecord,
    providers::{ApiSnafu, DecodeSnafu, ProviderError, ReqwestSnafu},
};

const MAX_ERROR_BODY: usize = 512;

/// Checks the status and decodes the body into a metrics window.
pub(crate) async fn read_window(response: Response) -> Result<Vec<MetricRecord>, ProviderError> {
    let status = response.status();
    let body = response.text().await.context(ReqwestSnafu)?;

    if !status.is_success() {
        return ApiSnafu {
            message: format!("HTTP {status}: {}", clip(&body)),
        }
        .fail();
    }

    decode_window(&body)
}

/// Decodes a response body into records.
///
/// A falsy payload (`null`, `false`, `0`, `""`, `[]`, `{}`, or an empty body)
/// means "no data" and yields an empty window. An object is the endpoint's
/// error envelope.
pub(crate) fn decode_window(body: &str) -> Result<Vec<MetricRecord>, ProviderError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body).context(DecodeSnafu)?;
    if is_falsy(&value) {
        return Ok(Vec::new());
    }

    match value {
        Value::Array(items) => serde_json::from_value(Value::Array(items)).context(DecodeSnafu),
        Value::Object(map) => {
            let message = ["message", "msg", "error"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| clip(body).to_string());
            ApiSnafu { message }.fail()
        }
        _ => ApiSnafu {
            message: format!("unexpected payload: {}", clip(body)),
        }
        .fail(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn clip(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_payloads_mean_no_data() {
        for body in ["", "  ", "null", "false", "[]", "{}", "0", "\"\""] {
            assert!(decode_window(body).unwrap().is_empty(), "body {body:?}");
        }
    }

    #[test]
    fn array_payload_decodes_records() {
        let window = decode_window(
            r#"[{"date":"2023-06-02T00:00:00.000Z","pe_ttm":{"weightedAvg":12.0}},
                {"date":"2023-06-01T00:00:00.000Z"}]"#,
        )
        .unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].pe(), Some(12.0));
    }

    #[test]
    fn error_envelope_surfaces_message() {
        let err = decode_window(r#"{"code":1,"message":"token invalid"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Api { .. }));
        assert_eq!(err.to_string(), "API error: token invalid");
    }

    #[test]
    fn html_error_page_is_a_decode_error() {
        let err = decode_window("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[test]
    fn malformed_record_is_a_decode_error() {
        let err = decode_window(r#"[{"close_point": 1.0}]"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }
}

//! Provider abstraction for index valuation sources.
//!
//! This module defines the [`DataProvider`] trait, the single seam between the
//! fetcher and the remote vendor. Each concrete endpoint (the token-based open
//! API and the cookie-based web endpoint) implements it and hides its own
//! request shape and authentication.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) so the fetch loop can pick an endpoint per index at
//! runtime via [`build_provider`].
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use metrics_ingestor::models::{index::IndexDescriptor, metric::MetricRecord};
//! use metrics_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl DataProvider for Offline {
//!     async fn fetch_metrics(
//!         &self,
//!         _index: &IndexDescriptor,
//!     ) -> Result<Vec<MetricRecord>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod lixinger_api;
pub mod lixinger_web;
mod response;

use async_trait::async_trait;
use shared_utils::config::Credentials;
use snafu::{Backtrace, OptionExt, Snafu};

use crate::models::{
    index::{IndexDescriptor, SourceKind},
    metric::MetricRecord,
};

pub use lixinger_api::ApiProvider;
pub use lixinger_web::WebProvider;

/// Metric names requested from both endpoints.
pub const EXPECTED_METRICS: [&str; 6] = [
    "pe_ttm",
    "pb",
    "ps_ttm",
    "dividend_r",
    "close_point",
    "market_value",
];

/// Trait for fetching a window of valuation metrics for one index.
#[async_trait]
pub trait DataProvider {
    /// Fetches the metrics window the endpoint offers for `index`.
    ///
    /// # Returns
    ///
    /// * `Ok(records)` - Records in whatever order the endpoint sent them.
    ///   An empty vector means the endpoint had no data.
    /// * `Err(ProviderError)` - Transport failure, non-success status, or an
    ///   undecodable body.
    async fn fetch_metrics(
        &self,
        index: &IndexDescriptor,
    ) -> Result<Vec<MetricRecord>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// The config file lacks the credential this endpoint needs.
    #[snafu(display("Missing credential for {source_kind} endpoint: {what}"))]
    MissingCredential {
        source_kind: SourceKind,
        what: &'static str,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Cookie jar contains characters not allowed in a header.
    #[snafu(display("Invalid cookie header: {source}"))]
    InvalidCookie {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The endpoint answered with a non-success status or an error payload.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The body is not a JSON array of metric records.
    #[snafu(display("Failed to decode metrics response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

/// Build the provider serving `source`, authenticated from `credentials`.
pub fn build_provider(
    source: SourceKind,
    credentials: &Credentials,
) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError> {
    match source {
        SourceKind::Api => {
            let token = credentials.token().context(MissingCredentialSnafu {
                source_kind: source,
                what: "token",
            })?;
            Ok(Box::new(ApiProvider::new(token)?))
        }
        SourceKind::Web => {
            let cookie = credentials
                .cookie_header()
                .context(MissingCredentialSnafu {
                    source_kind: source,
                    what: "http_cookies",
                })?;
            Ok(Box::new(WebProvider::new(&cookie)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_provider_requires_matching_credential() {
        let token_only = Credentials::new(Some("t".into()), []);
        assert!(build_provider(SourceKind::Api, &token_only).is_ok());
        let err = build_provider(SourceKind::Web, &token_only)
            .err()
            .expect("web endpoint needs cookies");
        assert!(matches!(
            err,
            ProviderInitError::MissingCredential { what: "http_cookies", .. }
        ));

        let cookies_only = Credentials::new(None, [("jwt".into(), "abc".into())]);
        assert!(build_provider(SourceKind::Web, &cookies_only).is_ok());
        assert!(build_provider(SourceKind::Api, &cookies_only).is_err());
    }

    #[test]
    fn build_provider_rejects_unprintable_cookie() {
        let creds = Credentials::new(None, [("jwt".into(), "bad\nvalue".into())]);
        let err = build_provider(SourceKind::Web, &creds)
            .err()
            .expect("newline is not a valid header byte");
        assert!(matches!(err, ProviderInitError::InvalidCookie { .. }));
    }
}

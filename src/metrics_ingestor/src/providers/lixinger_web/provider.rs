use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{index::IndexDescriptor, metric::MetricRecord},
    providers::{
        ClientBuildSnafu, DataProvider, InvalidCookieSnafu, ProviderError, ProviderInitError,
        ReqwestSnafu, lixinger_web::params::PriceMetricsRequest, response::read_window,
    },
};

const BASE_URL: &str = "https://www.lixinger.com/api/analyt/stock-collection/price-metrics/load";

pub struct WebProvider {
    client: Client,
    base_url: String,
}

impl WebProvider {
    /// Creates a provider that sends `cookie` (a ready `Cookie` header value)
    /// with every request.
    pub fn new(cookie: &SecretString) -> Result<Self, ProviderInitError> {
        let mut value =
            header::HeaderValue::from_str(cookie.expose_secret()).context(InvalidCookieSnafu)?;
        value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::COOKIE, value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Points the provider at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl DataProvider for WebProvider {
    async fn fetch_metrics(
        &self,
        index: &IndexDescriptor,
    ) -> Result<Vec<MetricRecord>, ProviderError> {
        let body = PriceMetricsRequest::new(index.code);
        debug!(code = index.code, url = %self.base_url, "requesting price metrics");

        let response = self
            .client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .context(ReqwestSnafu)?;

        read_window(response).await
    }
}

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{index::IndexDescriptor, metric::MetricRecord},
    providers::{
        ClientBuildSnafu, DataProvider, ProviderError, ProviderInitError, ReqwestSnafu,
        lixinger_api::params::FundamentalInfoRequest, response::read_window,
    },
};

const BASE_URL: &str = "https://www.lixinger.com/api/open/a/indice/fundamental-info";

pub struct ApiProvider {
    client: Client,
    base_url: String,
    token: SecretString,
    today: Option<NaiveDate>,
}

impl ApiProvider {
    /// Creates a provider authenticating with `token`.
    pub fn new(token: &SecretString) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            token: SecretString::new(token.expose_secret().into()),
            today: None,
        })
    }

    /// Points the provider at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Pins the date the five-year window is measured from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

#[async_trait]
impl DataProvider for ApiProvider {
    async fn fetch_metrics(
        &self,
        index: &IndexDescriptor,
    ) -> Result<Vec<MetricRecord>, ProviderError> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let body = FundamentalInfoRequest::new(self.token.expose_secret(), index.code, today);
        debug!(code = index.code, start_date = %body.start_date, url = %self.base_url, "requesting fundamental info");

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

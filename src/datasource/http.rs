use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DataSourceConfig;
use crate::datasource::{ensure_days, ensure_id, AdsDailyPerformance, DataSource, RealtimeSnapshot};
use crate::error::{DiagnosticsError, Result};

/// Reads dashboard data from the external reporting API.
#[derive(Clone)]
pub struct HttpDataSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpDataSource {
    pub fn from_config(config: &DataSourceConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        HttpDataSource::new(config.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.endpoint.trim_end_matches('/'), path_and_query);
        debug!(%url, "requesting reporting API");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "reporting API returned an error");
            return Err(DiagnosticsError::DataSource(format!(
                "reporting API error {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|err| {
            DiagnosticsError::DataSource(format!("failed to parse reporting API response: {}", err))
        })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn is_mock(&self) -> bool {
        false
    }

    async fn fetch_realtime(&self, property_id: &str) -> Result<RealtimeSnapshot> {
        let property_id = ensure_id("property_id", property_id)?;
        self.get_json(&format!(
            "/api/dashboard/realtime?property_id={}",
            urlencoding::encode(&property_id)
        ))
        .await
    }

    async fn fetch_ads_performance(
        &self,
        account_id: &str,
        days: u32,
    ) -> Result<Vec<AdsDailyPerformance>> {
        let account_id = ensure_id("account_id", account_id)?;
        let days = ensure_days(days)?;
        self.get_json(&format!(
            "/api/dashboard/ads-performance?account_id={}&days={}",
            urlencoding::encode(&account_id),
            days
        ))
        .await
    }
}

// HTTP history source backed by /api/history
use crate::application::errors::{DashboardError, DashboardResult};
use crate::application::history_source::HistorySource;
use crate::domain::period::WindowPeriod;
use crate::domain::sample::Sample;
use crate::infrastructure::retry::{fetch_with_retry, FetchError, RetryPolicy};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpHistorySource {
    base_url: String,
    client: Client,
    policy: RetryPolicy,
}

impl HttpHistorySource {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            policy,
        })
    }

    fn build_history_url(&self, device: &str, period: WindowPeriod) -> String {
        format!(
            "{}/api/history?ups={}&period={}",
            self.base_url,
            urlencoding::encode(device),
            period
        )
    }
}

#[async_trait]
impl HistorySource for HttpHistorySource {
    async fn fetch_history(&self, device: &str, period: WindowPeriod) -> DashboardResult<Vec<Sample>> {
        let url = self.build_history_url(device, period);
        tracing::debug!("Fetching history: {}", url);

        let response = fetch_with_retry(&self.client, &url, self.policy).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let samples = response
            .json::<Vec<Sample>>()
            .await
            .map_err(DashboardError::Decode)?;

        tracing::debug!("Got {} samples for {} ({})", samples.len(), device, period);
        Ok(samples)
    }
}

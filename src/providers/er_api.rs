//! Rates from the open.er-api.com "latest" endpoint.
use crate::core::currency::{RateSnapshot, RateSource};
use crate::providers::util::{RetryPolicy, with_retry};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct ErApiProvider {
    base_url: String,
    reference: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ErApiProvider {
    pub fn new(base_url: &str, reference: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxboard/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            reference: reference.to_uppercase(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ErApiResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateSource for ErApiProvider {
    #[instrument(skip(self), fields(reference = %self.reference))]
    async fn fetch(&self) -> Result<RateSnapshot> {
        let url = format!("{}/v6/latest/{}", self.base_url, self.reference);
        debug!("Requesting exchange rates from {}", url);

        let response = with_retry(|| async { self.client.get(&url).send().await }, self.retry)
            .await
            .with_context(|| format!("Request error for rates against {}", self.reference))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for rates against {}",
                response.status(),
                self.reference
            ));
        }

        let text = response.text().await?;
        let data: ErApiResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse JSON response for {}: {}",
                self.reference,
                e
            )
        })?;

        if data.result != "success" {
            return Err(anyhow!(
                "Rate API error for {}: {}",
                self.reference,
                data.error_type.as_deref().unwrap_or("unknown")
            ));
        }
        if data.rates.is_empty() {
            return Err(anyhow!("No rate data found for {}", self.reference));
        }

        let reference = data.base_code.as_deref().unwrap_or(&self.reference);
        debug!(count = data.rates.len(), reference, "Fetched exchange rates");
        Ok(RateSnapshot::new(reference, data.rates, Utc::now()))
    }
}

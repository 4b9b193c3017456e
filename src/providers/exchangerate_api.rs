use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::rates::{RateProvider, RateTable};

// ExchangeRateApiProvider implementation for RateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(alias = "base_code")]
    base: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable> {
        let url = format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base);
        debug!("Requesting latest rates from {}", self.base_url);

        let client = reqwest::Client::builder().user_agent("fxc/1.0").build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error for base currency {}: {}", base, e.without_url()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response for {}: {}", base, e.without_url()))?;

        if !status.is_success() {
            let error_type = serde_json::from_str::<LatestRatesResponse>(&text)
                .ok()
                .and_then(|data| data.error_type);
            return Err(match error_type {
                Some(error_type) => anyhow!(
                    "HTTP error: {} ({}) for base currency: {}",
                    status,
                    error_type,
                    base
                ),
                None => anyhow!("HTTP error: {} for base currency: {}", status, base),
            });
        }

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result.as_deref() == Some("error") {
            return Err(anyhow!(
                "Provider error: {} for base currency: {}",
                data.error_type.as_deref().unwrap_or("unknown"),
                base
            ));
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("No conversion rates found for base currency: {}", base))?;

        let reported_base: CurrencyCode = match data.base {
            Some(code) => code.parse()?,
            None => base.clone(),
        };
        if &reported_base != base {
            return Err(anyhow!(
                "Malformed payload: rates are for {} but {} was requested",
                reported_base,
                base
            ));
        }
        let last_updated = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());
        debug!(count = rates.len(), "Received conversion rates");

        RateTable::new(reported_base, rates, last_updated)
    }
}

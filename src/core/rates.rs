//! Rate lookup abstractions

use crate::core::currency::CurrencyCode;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Conversion rates from one base currency to every currency the provider
/// knows about, as returned by a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<String, f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a table, rejecting any rate that is not a positive finite number.
    pub fn new(
        base: CurrencyCode,
        rates: HashMap<String, f64>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if let Some((code, rate)) = rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(anyhow!("Invalid rate {} for currency: {}", rate, code));
        }
        Ok(Self {
            base,
            rates,
            last_updated,
        })
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn rate(&self, target: &CurrencyCode) -> Option<f64> {
        self.rates.get(target.as_str()).copied()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable>;
}

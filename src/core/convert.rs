//! Amount conversion using a single rate lookup

use crate::core::currency::CurrencyCode;
use crate::core::rates::RateProvider;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The provider was unreachable, answered with an error, or sent a payload
    /// that is not a rate table.
    #[error("Could not fetch exchange rates: {0}")]
    FetchFailed(String),

    /// The provider answered but has no rate for the target.
    #[error("Currency {0} is not available from the rate provider")]
    UnknownCurrency(CurrencyCode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(base: CurrencyCode, target: CurrencyCode, amount: f64) -> Self {
        Self {
            base,
            target,
            amount,
        }
    }

    /// Same amount, with base and target exchanged.
    pub fn swapped(self) -> Self {
        Self {
            base: self.target,
            target: self.base,
            amount: self.amount,
        }
    }
}

pub struct ConversionService<P: RateProvider> {
    provider: P,
}

impl<P: RateProvider> ConversionService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Converts `amount` from `base` into `target`. Makes exactly one call to
    /// the rate provider and applies no rounding.
    #[instrument(name = "Convert", skip(self), fields(base = %base, target = %target))]
    pub async fn convert(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        amount: f64,
    ) -> Result<f64, ConversionError> {
        let table = self
            .provider
            .fetch_rates(base)
            .await
            .map_err(|e| ConversionError::FetchFailed(format!("{e:#}")))?;

        let rate = table
            .rate(target)
            .ok_or_else(|| ConversionError::UnknownCurrency(target.clone()))?;
        debug!(rate, "Found conversion rate");

        Ok(amount * rate)
    }

    pub async fn convert_request(&self, request: &ConversionRequest) -> Result<f64, ConversionError> {
        self.convert(&request.base, &request.target, request.amount)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::RateTable;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        rates: Option<HashMap<String, f64>>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn with_rates(rates: &[(&str, f64)]) -> Self {
            Self {
                rates: Some(
                    rates
                        .iter()
                        .map(|(code, rate)| (code.to_string(), *rate))
                        .collect(),
                ),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                rates: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateProvider for StubProvider {
        async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.rates {
                Some(rates) => RateTable::new(base.clone(), rates.clone(), None),
                None => Err(anyhow!("connection refused")),
            }
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn usd_service() -> ConversionService<StubProvider> {
        ConversionService::new(StubProvider::with_rates(&[("USD", 1.0), ("EUR", 0.92)]))
    }

    #[tokio::test]
    async fn test_convert_usd_to_eur() {
        let service = usd_service();
        let value = service
            .convert(&code("USD"), &code("EUR"), 100.0)
            .await
            .unwrap();
        assert!((value - 92.0).abs() < 1e-9);
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_convert_multiplies_by_rate() {
        let service = usd_service();
        for amount in [0.01, 1.0, 12.5, 1_000_000.0] {
            let value = service
                .convert(&code("USD"), &code("EUR"), amount)
                .await
                .unwrap();
            assert_eq!(value, amount * 0.92);
        }
    }

    #[tokio::test]
    async fn test_convert_zero_and_negative_amounts() {
        let service = usd_service();
        let zero = service
            .convert(&code("USD"), &code("EUR"), 0.0)
            .await
            .unwrap();
        assert_eq!(zero, 0.0);

        let negative = service
            .convert(&code("USD"), &code("EUR"), -5.0)
            .await
            .unwrap();
        assert_eq!(negative, -5.0 * 0.92);
    }

    #[tokio::test]
    async fn test_unknown_target_currency() {
        let service = usd_service();
        let result = service.convert(&code("USD"), &code("XYZ"), 100.0).await;
        assert_eq!(result, Err(ConversionError::UnknownCurrency(code("XYZ"))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Currency XYZ is not available from the rate provider"
        );
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let service = ConversionService::new(StubProvider::failing());
        let result = service.convert(&code("USD"), &code("EUR"), 100.0).await;
        assert_eq!(
            result,
            Err(ConversionError::FetchFailed("connection refused".to_string()))
        );
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_swapped_request() {
        let service = ConversionService::new(StubProvider::with_rates(&[
            ("USD", 1.0),
            ("EUR", 0.92),
        ]));
        let request = ConversionRequest::new(code("EUR"), code("USD"), 50.0);

        let swapped = request.clone().swapped();
        assert_eq!(swapped.base, code("USD"));
        assert_eq!(swapped.target, code("EUR"));
        assert_eq!(swapped.amount, 50.0);

        let via_swap = service.convert_request(&swapped).await.unwrap();
        let direct = service
            .convert(&request.target, &request.base, request.amount)
            .await
            .unwrap();
        assert_eq!(via_swap, direct);
    }
}

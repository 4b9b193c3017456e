//! Currency codes and the default supported set

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Currencies offered by default. The rate provider has the final say on
/// which codes it can convert.
pub const SUPPORTED_CURRENCIES: [&str; 10] = [
    "ZAR", "USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY", "HKD",
];

/// An uppercase alphabetic currency code such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn supported() -> Vec<CurrencyCode> {
        SUPPORTED_CURRENCIES
            .iter()
            .map(|code| CurrencyCode(code.to_string()))
            .collect()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.is_empty() {
            return Err(anyhow!("Currency code must not be empty"));
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow!("Invalid currency code: {}", s));
        }
        Ok(CurrencyCode(code))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

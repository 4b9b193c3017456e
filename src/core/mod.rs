//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{ConversionError, ConversionRequest, ConversionService};
pub use currency::{CurrencyCode, SUPPORTED_CURRENCIES};
pub use rates::{RateProvider, RateTable};

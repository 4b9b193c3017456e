pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionService, CurrencyCode};
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        swap: bool,
    },
    Rates {
        base: Option<String>,
    },
    Currencies,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        currencies = config.currencies.len(),
        base_url = config.exchangerate_base_url(),
        "Loaded config"
    );
    Ok(config)
}

fn rate_provider(config: &AppConfig) -> Result<ExchangeRateApiProvider> {
    let api_key = config.api_key()?;
    Ok(ExchangeRateApiProvider::new(
        config.exchangerate_base_url(),
        &api_key,
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");
    let config = load_config(config_path)?;

    let output = match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let request = cli::convert::build_request(
                &config,
                &amount,
                from.as_deref(),
                to.as_deref(),
                swap,
            )?;
            let service = ConversionService::new(rate_provider(&config)?);
            cli::convert::run(&service, &request).await?
        }
        AppCommand::Rates { base } => {
            let base: CurrencyCode = match (base, &config.from) {
                (Some(text), _) => text.parse()?,
                (None, Some(code)) => code.clone(),
                (None, None) => "USD".parse()?,
            };
            let provider = rate_provider(&config)?;
            cli::rates::run(&provider, &base, &config.currencies).await?
        }
        AppCommand::Currencies => cli::currencies::display_currencies(&config.currencies),
    };

    println!("{output}");
    Ok(())
}

use super::ui;
use crate::core::config::AppConfig;
use crate::core::{ConversionRequest, ConversionService, CurrencyCode, RateProvider};
use anyhow::{Context, Result, anyhow};
use tracing::warn;

/// Parses user supplied amount text. Only finite numbers are accepted.
pub fn parse_amount(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| anyhow!("Invalid input. Please enter a valid number."))
}

/// Builds the request from command line values, falling back to the configured
/// default currencies.
pub fn build_request(
    config: &AppConfig,
    amount: &str,
    from: Option<&str>,
    to: Option<&str>,
    swap: bool,
) -> Result<ConversionRequest> {
    let amount = parse_amount(amount)?;
    let base = resolve_currency(from, config.from.as_ref(), "--from")?;
    let target = resolve_currency(to, config.to.as_ref(), "--to")?;

    for code in [&base, &target] {
        if !config.is_listed(code) {
            warn!(currency = %code, "Currency is not in the configured list");
        }
    }

    let request = ConversionRequest::new(base, target, amount);
    Ok(if swap { request.swapped() } else { request })
}

fn resolve_currency(
    arg: Option<&str>,
    default: Option<&CurrencyCode>,
    flag: &str,
) -> Result<CurrencyCode> {
    match (arg, default) {
        (Some(text), _) => text
            .parse()
            .with_context(|| format!("Invalid value for {flag}")),
        (None, Some(code)) => Ok(code.clone()),
        (None, None) => Err(anyhow!(
            "No currency given. Pass {} or set a default in the config file",
            flag
        )),
    }
}

/// Renders a conversion the way it is shown to the user, e.g. `USD 100 = EUR 92.00`.
pub fn format_conversion(request: &ConversionRequest, value: f64) -> String {
    format!(
        "{} {} = {} {:.2}",
        request.base, request.amount, request.target, value
    )
}

pub async fn run<P: RateProvider>(
    service: &ConversionService<P>,
    request: &ConversionRequest,
) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching {} rates...", request.base));
    let result = service.convert_request(request).await;
    spinner.finish_and_clear();

    let value = result?;
    if !value.is_finite() {
        return Err(anyhow!(
            "Converted amount is too large to display: {} {} in {}",
            request.base,
            request.amount,
            request.target
        ));
    }
    Ok(ui::style_text(
        &format_conversion(request, value),
        ui::StyleType::Result,
    ))
}

use super::ui;
use crate::core::{CurrencyCode, RateProvider, RateTable};
use anyhow::Result;
use comfy_table::Cell;

impl RateTable {
    /// Renders the rates for `currencies` relative to this table's base.
    pub fn display_as_table(&self, currencies: &[CurrencyCode]) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Rate (1 {})", self.base())),
        ]);

        for code in currencies {
            table.add_row(vec![
                Cell::new(code.as_str()),
                ui::format_optional_cell(self.rate(code), |r| format!("{r:.4}")),
            ]);
        }

        let mut output = format!(
            "Rates for {}\n\n",
            ui::style_text(self.base().as_str(), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        if let Some(updated) = self.last_updated() {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text(
                    &format!("Last updated: {}", updated.format("%Y-%m-%d %H:%M UTC")),
                    ui::StyleType::Subtle
                )
            ));
        }

        output
    }
}

pub async fn run(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    currencies: &[CurrencyCode],
) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching {base} rates..."));
    let result = provider.fetch_rates(base).await;
    spinner.finish_and_clear();

    Ok(result?.display_as_table(currencies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_as_table() {
        let rates = HashMap::from([("USD".to_string(), 1.0), ("EUR".to_string(), 0.9234567)]);
        let updated = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 1).single();
        let table = RateTable::new(code("USD"), rates, updated).unwrap();

        let output = console::strip_ansi_codes(
            &table.display_as_table(&[code("USD"), code("EUR"), code("XYZ")]),
        )
        .to_string();

        assert!(output.contains("Rates for USD"));
        assert!(output.contains("Rate (1 USD)"));
        assert!(output.contains("1.0000"));
        assert!(output.contains("0.9235"));
        assert!(output.contains("XYZ"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Last updated: 2025-01-01 00:00 UTC"));
    }
}

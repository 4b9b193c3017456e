use super::ui;
use crate::core::CurrencyCode;
use comfy_table::Cell;

pub fn display_currencies(currencies: &[CurrencyCode]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("#"), ui::header_cell("Currency")]);
    for (index, code) in currencies.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(code.as_str())]);
    }
    table.to_string()
}

use super::{PriceSource, quote_line, ui};
use crate::core::holdings::HoldingsStore;
use crate::core::price::PriceQuote;
use crate::core::units::OUNCE_TO_GRAMS;
use crate::core::zakah::{
    self, NISAB_GOLD_GRAMS, NISAB_SILVER_GRAMS, ZakahResult, nisab_gold_ounces,
    nisab_silver_ounces,
};
use anyhow::Result;
use comfy_table::Cell;

impl ZakahResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Metal"),
            ui::header_cell("Fine Grams"),
            ui::header_cell("Troy Ounces"),
            ui::header_cell("Nisab (g)"),
            ui::header_cell("Nisab (oz)"),
        ]);
        table.add_row(vec![
            Cell::new("Gold"),
            ui::number_cell(format!("{:.2}", self.gold_equivalent_grams)),
            ui::number_cell(format!("{:.3}", self.gold_equivalent_grams / OUNCE_TO_GRAMS)),
            ui::number_cell(format!("{NISAB_GOLD_GRAMS:.2}")),
            ui::number_cell(format!("{:.3}", nisab_gold_ounces())),
        ]);
        table.add_row(vec![
            Cell::new("Silver"),
            ui::number_cell(format!("{:.2}", self.silver_equivalent_grams)),
            ui::number_cell(format!("{:.3}", self.silver_equivalent_grams / OUNCE_TO_GRAMS)),
            ui::number_cell(format!("{NISAB_SILVER_GRAMS:.2}")),
            ui::number_cell(format!("{:.3}", nisab_silver_ounces())),
        ]);

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Zakah Calculation", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nPrecious Metal Value ({}): {:.2}",
            ui::style_text(&self.currency, ui::StyleType::TotalLabel),
            self.total_value_base
        ));

        let message_style = if self.nisab_met {
            ui::StyleType::TotalValue
        } else {
            ui::StyleType::Subtle
        };
        output.push_str(&format!(
            "\n{}",
            ui::style_text(&self.message, message_style)
        ));
        output
    }
}

/// Evaluates Zakah on the stored holdings. Fails when no prices are available.
pub fn run(store: &dyn HoldingsStore, quote: &PriceQuote, source: PriceSource) -> Result<()> {
    let coins = store.list_coins()?;
    let jewellery = store.list_jewellery()?;

    let result = zakah::evaluate_zakah(&coins, &jewellery, quote)?;
    println!("{}", result.display_as_table());
    println!(
        "{}",
        ui::style_text(&quote_line(quote, source), ui::StyleType::Subtle)
    );
    Ok(())
}

use super::{PriceSource, quote_line, ui};
use crate::core::holdings::HoldingsStore;
use crate::core::price::PriceQuote;
use crate::core::valuation::{self, HoldingKind, PortfolioValue};
use anyhow::Result;
use comfy_table::Cell;

impl PortfolioValue {
    pub fn display_as_table(&self) -> String {
        let target_currency = &self.target_currency;

        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Id"),
            ui::header_cell("Holding"),
            ui::header_cell("Type"),
            ui::header_cell("Metal"),
            ui::header_cell("Grams"),
            ui::header_cell(&format!("Value ({target_currency})")),
            ui::header_cell("Weight (%)"),
        ]);

        for holding in &self.holdings {
            let kind = match holding.kind {
                HoldingKind::Coin => "Coin".to_string(),
                HoldingKind::Jewellery => match holding.karat {
                    Some(karat) => format!("Jewellery {karat}K"),
                    None => "Jewellery".to_string(),
                },
            };
            let short_id: String = holding.id.to_string().chars().take(8).collect();

            table.add_row(vec![
                Cell::new(short_id),
                Cell::new(&holding.name),
                Cell::new(kind),
                Cell::new(holding.metal.to_string()),
                ui::number_cell(format!("{:.2}", holding.grams)),
                ui::number_cell(format!("{:.2}", holding.value)),
                ui::format_optional_cell(holding.weight, |w| format!("{w:.2}%")),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Precious Metals Portfolio", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let total_style_type = if self.total_value > 0.0 {
            ui::StyleType::TotalValue
        } else {
            ui::StyleType::Error
        };
        output.push_str(&format!(
            "\n\nTotal Value ({}): {}",
            ui::style_text(target_currency, ui::StyleType::TotalLabel),
            ui::style_text(&format!("{:.2}", self.total_value), total_style_type)
        ));
        if !self.converted {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    "No exchange rate available, values are in the base currency.",
                    ui::StyleType::Error
                )
            ));
        }

        output
    }
}

pub fn run(
    store: &dyn HoldingsStore,
    quote: &PriceQuote,
    source: PriceSource,
    target_currency: &str,
) -> Result<()> {
    let coins = store.list_coins()?;
    let jewellery = store.list_jewellery()?;

    if coins.is_empty() && jewellery.is_empty() {
        println!("No holdings recorded yet. Add some with `add-coin` or `add-jewellery`.");
        return Ok(());
    }

    let portfolio = valuation::value_portfolio(&coins, &jewellery, target_currency, quote);
    println!("{}", portfolio.display_as_table());
    println!(
        "{}",
        ui::style_text(&quote_line(quote, source), ui::StyleType::Subtle)
    );
    if source == PriceSource::Unavailable {
        println!(
            "{}",
            ui::style_text(
                "Metal prices not loaded or manually entered, values shown as 0.",
                ui::StyleType::Error
            )
        );
    }

    Ok(())
}

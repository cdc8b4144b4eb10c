use super::ui;
use crate::core::price::{HistoricalPrice, MetalPrices, PriceProvider};
use anyhow::{Result, anyhow};
use comfy_table::Cell;
use futures::future::join;

fn change_from(before: Option<f64>, now: f64) -> Cell {
    match before.filter(|b| *b > 0.0) {
        Some(before) => ui::change_cell((now - before) / before * 100.0),
        None => ui::format_optional_cell(None::<f64>, |c| format!("{c:.2}")),
    }
}

/// Renders daily prices with the change from the previous day.
pub fn history_table(history: &[HistoricalPrice], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("Gold ({currency}/g)")),
        ui::header_cell("Change"),
        ui::header_cell(&format!("Silver ({currency}/g)")),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<&HistoricalPrice> = None;
    for price in history {
        let gold_change = change_from(previous.map(|p| p.gold), price.gold);
        let silver_change = change_from(previous.map(|p| p.silver), price.silver);

        table.add_row(vec![
            Cell::new(price.date.format("%Y-%m-%d").to_string()),
            ui::number_cell(format!("{:.2}", price.gold)),
            gold_change,
            ui::number_cell(format!("{:.2}", price.silver)),
            silver_change,
        ]);
        previous = Some(price);
    }

    table.to_string()
}

fn current_line(prices: &MetalPrices, base_currency: &str, secondary_currency: &str) -> String {
    format!(
        "Current: Gold {:.2} {base_currency}/g, Silver {:.2} {base_currency}/g, 1 {base_currency} = {:.4} {secondary_currency}",
        prices.gold_per_gram_base, prices.silver_per_gram_base, prices.base_to_secondary_rate
    )
}

pub async fn run(
    provider: Option<&dyn PriceProvider>,
    base_currency: &str,
    secondary_currency: &str,
) -> Result<()> {
    let provider = provider.ok_or_else(|| anyhow!("No price provider configured"))?;

    let pb = ui::new_spinner("Fetching metal prices...");
    let (current, history) =
        join(provider.get_current_prices(), provider.get_historical_prices()).await;
    pb.finish_and_clear();

    let history = history?;
    println!(
        "{}\n",
        ui::style_text("Historical Metal Prices", ui::StyleType::Title)
    );
    println!("{}", history_table(&history, base_currency));

    match current {
        Ok(prices) => println!(
            "\n{}",
            ui::style_text(
                &current_line(&prices, base_currency, secondary_currency),
                ui::StyleType::TotalLabel
            )
        ),
        Err(e) => println!(
            "\n{}",
            ui::style_text(
                &format!("Current prices unavailable: {e}"),
                ui::StyleType::Error
            )
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_history_table() {
        let history = vec![
            HistoricalPrice {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                gold: 2000.0,
                silver: 25.0,
            },
            HistoricalPrice {
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                gold: 2100.0,
                silver: 24.0,
            },
        ];

        let output = history_table(&history, "ZAR");
        assert!(output.contains("2024-03-01"));
        assert!(output.contains("2100.00"));
        assert!(output.contains("+5.00%"));
        assert!(output.contains("-4.00%"));
        assert!(output.contains("Gold (ZAR/g)"));
    }

    #[test]
    fn test_current_line() {
        let prices = MetalPrices {
            gold_per_gram_base: 2071.28,
            silver_per_gram_base: 28.0,
            base_to_secondary_rate: 0.055,
        };
        assert_eq!(
            current_line(&prices, "ZAR", "USD"),
            "Current: Gold 2071.28 ZAR/g, Silver 28.00 ZAR/g, 1 ZAR = 0.0550 USD"
        );
    }
}

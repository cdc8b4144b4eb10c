pub mod history;
pub mod holdings;
pub mod setup;
pub mod summary;
pub mod ui;
pub mod zakah;

use crate::core::price::{ManualPrices, PriceProvider, PriceQuote};
use std::fmt::Display;
use tracing::{debug, warn};

/// Where the prices of a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Fetched,
    Manual,
    Unavailable,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PriceSource::Fetched => "fetched",
                PriceSource::Manual => "manual",
                PriceSource::Unavailable => "unavailable",
            }
        )
    }
}

/// Fetches current prices and applies the manual override.
///
/// A failing provider leaves the quote without fetched prices instead of
/// failing the command.
pub async fn resolve_quote(
    provider: Option<&dyn PriceProvider>,
    base_currency: &str,
    manual: Option<&ManualPrices>,
) -> (PriceQuote, PriceSource) {
    let live = match provider {
        Some(provider) => {
            let pb = ui::new_spinner("Fetching metal prices...");
            let result = provider.get_current_prices().await;
            pb.finish_and_clear();
            match result {
                Ok(prices) => Some(prices),
                Err(e) => {
                    warn!("Failed to fetch metal prices: {e}");
                    None
                }
            }
        }
        None => {
            debug!("No price provider configured");
            None
        }
    };

    let quote = PriceQuote::select(base_currency, live.as_ref(), manual);
    let source = if !quote.has_prices() {
        PriceSource::Unavailable
    } else if manual.is_some_and(|m| m.enabled) {
        PriceSource::Manual
    } else {
        PriceSource::Fetched
    };
    (quote, source)
}

/// One line description of the prices in use.
pub fn quote_line(quote: &PriceQuote, source: PriceSource) -> String {
    let rate = quote
        .base_to_secondary_rate
        .map_or("N/A".to_string(), |r| format!("{r:.4}"));
    format!(
        "Gold {:.2}/g, Silver {:.2}/g ({}, {}), rate {}",
        quote.gold_per_gram, quote.silver_per_gram, quote.base_currency, source, rate
    )
}

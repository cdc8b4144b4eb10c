//! Values holdings against a price quote.
use crate::core::holdings::{Coin, Jewellery};
use crate::core::price::PriceQuote;
use crate::core::purity::effective_purity;
use crate::core::units::Metal;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoldingKind {
    Coin,
    Jewellery,
}

/// Represents the calculated value and weight of a single holding.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValue {
    pub id: Uuid,
    pub kind: HoldingKind,
    pub name: String,
    pub metal: Metal,
    pub karat: Option<u32>,
    pub grams: f64,
    pub value: f64,
    pub weight: Option<f64>,
}

/// Represents a summary of all holdings, with values in `target_currency`.
#[derive(Debug, Serialize)]
pub struct PortfolioValue {
    pub holdings: Vec<HoldingValue>,
    pub total_value: f64,
    pub target_currency: String,
    /// `false` when a non-base currency was requested but the quote had no rate.
    pub converted: bool,
}

/// Value of `total_weight_grams` of `metal` in `target_currency`.
///
/// Returns 0 when the quote has no prices. When the target differs from the
/// base currency and the quote has no rate, the base currency value is
/// returned unconverted.
pub fn value_of(
    metal: Metal,
    total_weight_grams: f64,
    target_currency: &str,
    karat: Option<u32>,
    quote: &PriceQuote,
) -> f64 {
    if !quote.has_prices() {
        return 0.0;
    }

    let mut price_per_gram = quote.price_per_gram(metal);
    if metal == Metal::Gold {
        price_per_gram *= effective_purity(karat);
    }

    let value = total_weight_grams * price_per_gram;
    if quote.is_base_currency(target_currency) {
        return value;
    }

    match quote.base_to_secondary_rate {
        Some(rate) => value * rate,
        None => {
            debug!(
                "No rate for {} -> {target_currency}, keeping base value {value}",
                quote.base_currency
            );
            value
        }
    }
}

pub fn coin_value(coin: &Coin, target_currency: &str, quote: &PriceQuote) -> f64 {
    value_of(coin.metal, coin.total_grams(), target_currency, None, quote)
}

pub fn jewellery_value(item: &Jewellery, target_currency: &str, quote: &PriceQuote) -> f64 {
    value_of(
        item.metal,
        item.total_grams(),
        target_currency,
        item.karat,
        quote,
    )
}

/// Combined value of all coins and jewellery in `target_currency`.
pub fn total_value(
    coins: &[Coin],
    jewellery: &[Jewellery],
    target_currency: &str,
    quote: &PriceQuote,
) -> f64 {
    let coins_total: f64 = coins
        .iter()
        .map(|coin| coin_value(coin, target_currency, quote))
        .sum();
    let jewellery_total: f64 = jewellery
        .iter()
        .map(|item| jewellery_value(item, target_currency, quote))
        .sum();
    coins_total + jewellery_total
}

/// Calculates the value and weight of each holding.
pub fn value_portfolio(
    coins: &[Coin],
    jewellery: &[Jewellery],
    target_currency: &str,
    quote: &PriceQuote,
) -> PortfolioValue {
    let mut holdings: Vec<HoldingValue> = coins
        .iter()
        .map(|coin| HoldingValue {
            id: coin.id,
            kind: HoldingKind::Coin,
            name: coin.name.clone(),
            metal: coin.metal,
            karat: None,
            grams: coin.total_grams(),
            value: coin_value(coin, target_currency, quote),
            weight: None,
        })
        .chain(jewellery.iter().map(|item| HoldingValue {
            id: item.id,
            kind: HoldingKind::Jewellery,
            name: item.name.clone(),
            metal: item.metal,
            karat: item.karat,
            grams: item.total_grams(),
            value: jewellery_value(item, target_currency, quote),
            weight: None,
        }))
        .collect();

    let total_value: f64 = holdings.iter().map(|h| h.value).sum();
    if total_value > 0.0 {
        for holding in &mut holdings {
            holding.weight = Some((holding.value / total_value) * 100.0);
        }
    }
    debug!(
        "Valued {} holdings at {total_value} {target_currency}",
        holdings.len()
    );

    PortfolioValue {
        holdings,
        total_value,
        target_currency: target_currency.to_string(),
        converted: quote.is_base_currency(target_currency)
            || quote.base_to_secondary_rate.is_some(),
    }
}

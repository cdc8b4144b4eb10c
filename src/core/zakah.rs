//! Zakah evaluation over precious metal holdings.
//!
//! Gold and silver are aggregated to fine-metal grams separately. Coins count
//! as fine metal; gold jewellery is reduced by its purity factor. If either
//! metal reaches its Nisab, 2.5% is due on the combined value of both metals.
//! Amounts are always in the base currency.

use crate::core::holdings::{Coin, Jewellery};
use crate::core::price::PriceQuote;
use crate::core::purity::effective_purity;
use crate::core::units::{Metal, OUNCE_TO_GRAMS};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const NISAB_GOLD_GRAMS: f64 = 87.48;
pub const NISAB_SILVER_GRAMS: f64 = 612.36;
pub const ZAKAH_RATE: f64 = 0.025;

pub const BELOW_NISAB_MESSAGE: &str =
    "Your holdings are below the Nisab threshold. No Zakah is due.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZakahError {
    #[error("Cannot calculate Zakah, metal prices not loaded or manually entered.")]
    PricesUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZakahResult {
    pub amount_in_base: f64,
    pub gold_equivalent_grams: f64,
    pub silver_equivalent_grams: f64,
    pub total_value_base: f64,
    pub nisab_met: bool,
    pub currency: String,
    pub message: String,
}

/// Gold Nisab in troy ounces.
pub fn nisab_gold_ounces() -> f64 {
    NISAB_GOLD_GRAMS / OUNCE_TO_GRAMS
}

/// Silver Nisab in troy ounces.
pub fn nisab_silver_ounces() -> f64 {
    NISAB_SILVER_GRAMS / OUNCE_TO_GRAMS
}

/// Fine-metal grams of gold and silver, in that order.
pub fn fine_metal_grams(coins: &[Coin], jewellery: &[Jewellery]) -> (f64, f64) {
    let mut gold = 0.0;
    let mut silver = 0.0;

    for coin in coins {
        match coin.metal {
            Metal::Gold => gold += coin.total_grams(),
            Metal::Silver => silver += coin.total_grams(),
        }
    }

    for item in jewellery {
        match item.metal {
            Metal::Gold => gold += item.total_grams() * effective_purity(item.karat),
            Metal::Silver => silver += item.total_grams(),
        }
    }

    (gold, silver)
}

pub fn evaluate_zakah(
    coins: &[Coin],
    jewellery: &[Jewellery],
    quote: &PriceQuote,
) -> Result<ZakahResult, ZakahError> {
    let (gold_grams, silver_grams) = fine_metal_grams(coins, jewellery);
    evaluate_fine_grams(gold_grams, silver_grams, quote)
}

/// Evaluates Zakah for already aggregated fine-metal weights.
pub fn evaluate_fine_grams(
    gold_grams: f64,
    silver_grams: f64,
    quote: &PriceQuote,
) -> Result<ZakahResult, ZakahError> {
    if !quote.has_prices() {
        return Err(ZakahError::PricesUnavailable);
    }

    let total_value_base =
        gold_grams * quote.gold_per_gram + silver_grams * quote.silver_per_gram;
    let nisab_met = gold_grams >= NISAB_GOLD_GRAMS || silver_grams >= NISAB_SILVER_GRAMS;
    debug!(gold_grams, silver_grams, total_value_base, nisab_met, "Evaluated Zakah holdings");

    let (amount_in_base, message) = if nisab_met {
        let amount = total_value_base * ZAKAH_RATE;
        (
            amount,
            format!("Zakah to pay: {amount:.2} {}", quote.base_currency),
        )
    } else {
        (0.0, BELOW_NISAB_MESSAGE.to_string())
    };

    Ok(ZakahResult {
        amount_in_base,
        gold_equivalent_grams: gold_grams,
        silver_equivalent_grams: silver_grams,
        total_value_base,
        nisab_met,
        currency: quote.base_currency.clone(),
        message,
    })
}

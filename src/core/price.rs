//! Pricing abstractions and core types

use crate::core::units::Metal;
use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshot of current prices as reported by a [`PriceProvider`].
///
/// Prices are per gram in the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalPrices {
    #[serde(alias = "goldPerGramZAR")]
    pub gold_per_gram_base: f64,
    #[serde(alias = "silverPerGramZAR")]
    pub silver_per_gram_base: f64,
    #[serde(alias = "zarToUsdRate")]
    pub base_to_secondary_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPrice {
    pub date: NaiveDate,
    pub gold: f64,
    pub silver: f64,
}

impl MetalPrices {
    /// Rejects negative or non-finite prices and rates.
    pub fn validate(&self) -> Result<()> {
        check_price("gold", self.gold_per_gram_base)?;
        check_price("silver", self.silver_per_gram_base)?;
        check_price("exchange rate", self.base_to_secondary_rate)
    }
}

fn check_price(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("The {label} price must be a non-negative number, got {value}");
    }
    Ok(())
}

/// User supplied per-gram prices that replace the live ones when enabled.
///
/// A missing field is pre-filled from the live quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualPrices {
    #[serde(default)]
    pub enabled: bool,
    pub gold_per_gram: Option<f64>,
    pub silver_per_gram: Option<f64>,
}

impl ManualPrices {
    pub fn validate(&self) -> Result<()> {
        if let Some(gold) = self.gold_per_gram {
            check_price("gold", gold)?;
        }
        if let Some(silver) = self.silver_per_gram {
            check_price("silver", silver)?;
        }
        Ok(())
    }
}

/// The prices a valuation runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub base_currency: String,
    pub gold_per_gram: f64,
    pub silver_per_gram: f64,
    /// Rate from the base to the secondary currency. Only a live quote carries one.
    pub base_to_secondary_rate: Option<f64>,
}

impl PriceQuote {
    pub fn new(
        base_currency: &str,
        gold_per_gram: f64,
        silver_per_gram: f64,
        base_to_secondary_rate: Option<f64>,
    ) -> Self {
        PriceQuote {
            base_currency: base_currency.to_string(),
            gold_per_gram,
            silver_per_gram,
            base_to_secondary_rate,
        }
    }

    /// A quote with no prices and no rate.
    pub fn unavailable(base_currency: &str) -> Self {
        Self::new(base_currency, 0.0, 0.0, None)
    }

    pub fn from_live(base_currency: &str, live: &MetalPrices) -> Self {
        Self::new(
            base_currency,
            live.gold_per_gram_base,
            live.silver_per_gram_base,
            Some(live.base_to_secondary_rate),
        )
    }

    /// Chooses between the live quote and an enabled manual override.
    pub fn select(
        base_currency: &str,
        live: Option<&MetalPrices>,
        manual: Option<&ManualPrices>,
    ) -> Self {
        let live_quote = live.map_or_else(
            || Self::unavailable(base_currency),
            |prices| Self::from_live(base_currency, prices),
        );

        match manual {
            Some(manual) if manual.enabled => {
                debug!(?manual, "Using manual price override");
                Self::new(
                    base_currency,
                    manual.gold_per_gram.unwrap_or(live_quote.gold_per_gram),
                    manual.silver_per_gram.unwrap_or(live_quote.silver_per_gram),
                    live_quote.base_to_secondary_rate,
                )
            }
            _ => live_quote,
        }
    }

    pub fn price_per_gram(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Gold => self.gold_per_gram,
            Metal::Silver => self.silver_per_gram,
        }
    }

    /// Whether `currency` names the base currency, ignoring case.
    pub fn is_base_currency(&self, currency: &str) -> bool {
        currency.eq_ignore_ascii_case(&self.base_currency)
    }

    /// `false` when neither metal has a price.
    pub fn has_prices(&self) -> bool {
        self.gold_per_gram != 0.0 || self.silver_per_gram != 0.0
    }
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn get_current_prices(&self) -> Result<MetalPrices>;

    /// Daily prices ordered by date, oldest first. For display only.
    async fn get_historical_prices(&self) -> Result<Vec<HistoricalPrice>>;
}

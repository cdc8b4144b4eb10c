use crate::core::price::{HistoricalPrice, MetalPrices, PriceProvider};
use crate::core::units::OUNCE_TO_GRAMS;
use crate::providers::util::round_cents;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

pub const BASE_GOLD_PRICE_PER_OUNCE: f64 = 64424.0;
pub const BASE_SILVER_PRICE_PER_GRAM: f64 = 28.0;
pub const BASE_TO_SECONDARY_RATE: f64 = 0.055;
pub const HISTORY_DAYS: u64 = 30;

/// Simulated price feed used when no live prices can be fetched.
///
/// Prices wander randomly around fixed base values.
pub struct SyntheticPriceProvider {
    rng: Mutex<StdRng>,
    today: Option<NaiveDate>,
}

impl SyntheticPriceProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            today: None,
        }
    }

    /// Deterministic provider for tests.
    pub fn with_seed(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            today: Some(today),
        }
    }

    /// Multiplier in `1 ± spread / 2`.
    fn fluctuation(&self, spread: f64) -> Result<f64> {
        let mut rng = self.rng.lock().map_err(|_| anyhow!("Price rng poisoned"))?;
        Ok(1.0 + rng.gen_range(-0.5..0.5) * spread)
    }

    fn gold_per_gram() -> f64 {
        BASE_GOLD_PRICE_PER_OUNCE / OUNCE_TO_GRAMS
    }
}

impl Default for SyntheticPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for SyntheticPriceProvider {
    async fn get_current_prices(&self) -> Result<MetalPrices> {
        let gold = Self::gold_per_gram() * self.fluctuation(0.02)?;
        let silver = BASE_SILVER_PRICE_PER_GRAM * self.fluctuation(0.03)?;
        debug!(gold, silver, "Generated synthetic metal prices");

        Ok(MetalPrices {
            gold_per_gram_base: round_cents(gold),
            silver_per_gram_base: round_cents(silver),
            base_to_secondary_rate: BASE_TO_SECONDARY_RATE,
        })
    }

    async fn get_historical_prices(&self) -> Result<Vec<HistoricalPrice>> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());

        (0..=HISTORY_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today
                    .checked_sub_days(Days::new(days_ago))
                    .ok_or_else(|| anyhow!("Date out of range: {today} - {days_ago} days"))?;
                Ok(HistoricalPrice {
                    date,
                    gold: round_cents(Self::gold_per_gram() * self.fluctuation(0.1)?),
                    silver: round_cents(BASE_SILVER_PRICE_PER_GRAM * self.fluctuation(0.15)?),
                })
            })
            .collect()
    }
}

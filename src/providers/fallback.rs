use crate::core::price::{HistoricalPrice, MetalPrices, PriceProvider};
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Answers from `fallback` whenever `primary` fails.
pub struct FallbackPriceProvider<P: PriceProvider, F: PriceProvider> {
    primary: P,
    fallback: F,
}

impl<P: PriceProvider, F: PriceProvider> FallbackPriceProvider<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: PriceProvider, F: PriceProvider> PriceProvider for FallbackPriceProvider<P, F> {
    async fn get_current_prices(&self) -> Result<MetalPrices> {
        match self.primary.get_current_prices().await {
            Ok(prices) => Ok(prices),
            Err(e) => {
                warn!("Live metal prices unavailable, using fallback: {e}");
                self.fallback.get_current_prices().await
            }
        }
    }

    async fn get_historical_prices(&self) -> Result<Vec<HistoricalPrice>> {
        match self.primary.get_historical_prices().await {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!("Historical metal prices unavailable, using fallback: {e}");
                self.fallback.get_historical_prices().await
            }
        }
    }
}

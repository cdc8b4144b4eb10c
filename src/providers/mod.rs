pub mod fallback;
pub mod http_provider;
pub mod synthetic;
pub mod util;

use crate::core::config::ProvidersConfig;
use crate::core::price::PriceProvider;
use anyhow::Result;
use fallback::FallbackPriceProvider;
use http_provider::HttpPriceProvider;
use synthetic::SyntheticPriceProvider;

/// Builds the configured price provider, or `None` when no source of prices is configured.
pub fn build_price_provider(config: &ProvidersConfig) -> Result<Option<Box<dyn PriceProvider>>> {
    let provider: Option<Box<dyn PriceProvider>> =
        match (&config.metals, config.synthetic_fallback) {
            (Some(metals), true) => Some(Box::new(FallbackPriceProvider::new(
                HttpPriceProvider::new(&metals.base_url)?,
                SyntheticPriceProvider::new(),
            ))),
            (Some(metals), false) => Some(Box::new(HttpPriceProvider::new(&metals.base_url)?)),
            (None, true) => Some(Box::new(SyntheticPriceProvider::new())),
            (None, false) => None,
        };
    Ok(provider)
}

pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::holdings::{NewCoin, NewJewellery};
use crate::core::config::AppConfig;
use crate::core::price::ManualPrices;
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Summary { currency: Option<String> },
    Zakah,
    History,
    AddCoin(NewCoin),
    AddJewellery(NewJewellery),
    Remove { id: String },
}

/// Manual prices given on the command line. They take precedence over the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceOverrides {
    pub gold_per_gram: Option<f64>,
    pub silver_per_gram: Option<f64>,
}

impl PriceOverrides {
    /// Merges the overrides into the configured manual prices.
    ///
    /// Fails when a resulting price is negative or not a number.
    pub fn apply(&self, configured: Option<&ManualPrices>) -> Result<Option<ManualPrices>> {
        let merged = if self.gold_per_gram.is_none() && self.silver_per_gram.is_none() {
            configured.cloned()
        } else {
            Some(self.merge(configured))
        };
        if let Some(manual) = &merged {
            manual.validate().context("Invalid manual prices")?;
        }
        Ok(merged)
    }

    fn merge(&self, configured: Option<&ManualPrices>) -> ManualPrices {
        ManualPrices {
            enabled: true,
            gold_per_gram: self
                .gold_per_gram
                .or_else(|| configured.and_then(|m| m.gold_per_gram)),
            silver_per_gram: self
                .silver_per_gram
                .or_else(|| configured.and_then(|m| m.silver_per_gram)),
        }
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    overrides: PriceOverrides,
) -> Result<()> {
    info!("Precious Metals Tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::open_store(&config)?;

    match command {
        AppCommand::AddCoin(new) => cli::holdings::add_coin(store.as_ref(), new).map(|_| ()),
        AppCommand::AddJewellery(new) => {
            cli::holdings::add_jewellery(store.as_ref(), new).map(|_| ())
        }
        AppCommand::Remove { id } => cli::holdings::remove(store.as_ref(), &id),
        AppCommand::History => {
            let provider = providers::build_price_provider(&config.providers)?;
            cli::history::run(
                provider.as_deref(),
                &config.base_currency,
                &config.secondary_currency,
            )
            .await
        }
        AppCommand::Summary { currency } => {
            let provider = providers::build_price_provider(&config.providers)?;
            let target_currency = config.resolve_currency(currency.as_deref())?;
            let manual = overrides.apply(config.manual_prices.as_ref())?;
            let (quote, source) =
                cli::resolve_quote(provider.as_deref(), &config.base_currency, manual.as_ref())
                    .await;
            cli::summary::run(store.as_ref(), &quote, source, &target_currency)
        }
        AppCommand::Zakah => {
            let provider = providers::build_price_provider(&config.providers)?;
            let manual = overrides.apply(config.manual_prices.as_ref())?;
            let (quote, source) =
                cli::resolve_quote(provider.as_deref(), &config.base_currency, manual.as_ref())
                    .await;
            cli::zakah::run(store.as_ref(), &quote, source)
        }
    }
}

//! Core business logic: holdings, prices, valuation and Zakah

pub mod config;
pub mod holdings;
pub mod log;
pub mod price;
pub mod purity;
pub mod units;
pub mod valuation;
pub mod zakah;

// Re-export main types for cleaner imports
pub use holdings::{Coin, HoldingsStore, Jewellery};
pub use price::{HistoricalPrice, ManualPrices, MetalPrices, PriceProvider, PriceQuote};
pub use units::{Metal, WeightUnit};
pub use zakah::{ZakahError, ZakahResult};

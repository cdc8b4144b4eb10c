pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::holdings::HoldingsStore;
use anyhow::Result;
use disk::DiskHoldings;

/// Opens the on-disk holdings store under the configured data path.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn HoldingsStore>> {
    let path = config.data_path()?;
    Ok(Box::new(DiskHoldings::open(&path)?))
}

use crate::core::holdings::{Coin, HoldingsStore, Jewellery};
use anyhow::{Result, anyhow};
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// In-memory holdings store using vectors behind a RwLock
#[derive(Default)]
pub struct MemoryHoldings {
    coins: RwLock<Vec<Coin>>,
    jewellery: RwLock<Vec<Jewellery>>,
}

impl MemoryHoldings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holdings(coins: Vec<Coin>, jewellery: Vec<Jewellery>) -> Self {
        Self {
            coins: RwLock::new(coins),
            jewellery: RwLock::new(jewellery),
        }
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("Holdings lock poisoned")
}

impl HoldingsStore for MemoryHoldings {
    fn list_coins(&self) -> Result<Vec<Coin>> {
        Ok(self.coins.read().map_err(poisoned)?.clone())
    }

    fn list_jewellery(&self) -> Result<Vec<Jewellery>> {
        Ok(self.jewellery.read().map_err(poisoned)?.clone())
    }

    fn add_coin(&self, coin: Coin) -> Result<()> {
        debug!("Adding coin {} ({})", coin.name, coin.id);
        self.coins.write().map_err(poisoned)?.push(coin);
        Ok(())
    }

    fn add_jewellery(&self, item: Jewellery) -> Result<()> {
        debug!("Adding jewellery {} ({})", item.name, item.id);
        self.jewellery.write().map_err(poisoned)?.push(item);
        Ok(())
    }

    fn remove(&self, id: &Uuid) -> Result<bool> {
        let mut coins = self.coins.write().map_err(poisoned)?;
        if let Some(index) = coins.iter().position(|c| c.id == *id) {
            coins.remove(index);
            debug!("Removed coin {}", id);
            return Ok(true);
        }
        drop(coins);

        let mut jewellery = self.jewellery.write().map_err(poisoned)?;
        if let Some(index) = jewellery.iter().position(|j| j.id == *id) {
            jewellery.remove(index);
            debug!("Removed jewellery {}", id);
            return Ok(true);
        }
        Ok(false)
    }
}

use crate::core::holdings::{Coin, HoldingsStore, Jewellery};
use anyhow::{Context, Result, anyhow};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Only the id of a stored holding, enough to find it for removal.
#[derive(Deserialize)]
struct StoredId {
    id: Uuid,
}

/// Holdings persisted in a fjall keyspace.
///
/// Each kind of holding lives in its own partition, keyed by a big-endian
/// insertion sequence number so iteration follows insertion order.
pub struct DiskHoldings {
    keyspace: Keyspace,
    coins: PartitionHandle,
    jewellery: PartitionHandle,
    write_lock: Mutex<()>,
}

impl DiskHoldings {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path.join("holdings"))
            .open()
            .with_context(|| format!("Failed to open holdings store at {}", path.display()))?;
        let coins = keyspace.open_partition("coins", PartitionCreateOptions::default())?;
        let jewellery = keyspace.open_partition("jewellery", PartitionCreateOptions::default())?;
        debug!("Opened holdings store at {}", path.display());

        Ok(Self {
            keyspace,
            coins,
            jewellery,
            write_lock: Mutex::new(()),
        })
    }

    fn list<T: DeserializeOwned>(partition: &PartitionHandle) -> Result<Vec<T>> {
        partition
            .iter()
            .map(|entry| {
                let (_, value) = entry?;
                serde_json::from_slice(&value).context("Failed to decode stored holding")
            })
            .collect()
    }

    fn append<T: Serialize>(&self, partition: &PartitionHandle, item: &T) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Holdings lock poisoned"))?;

        let next = match partition.iter().next_back().transpose()? {
            Some((key, _)) => {
                let bytes: [u8; 8] = key
                    .as_ref()
                    .try_into()
                    .context("Corrupt holdings key")?;
                u64::from_be_bytes(bytes) + 1
            }
            None => 0,
        };

        partition.insert(next.to_be_bytes().to_vec(), serde_json::to_vec(item)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn remove_from(&self, partition: &PartitionHandle, id: &Uuid) -> Result<bool> {
        for entry in partition.iter() {
            let (key, value) = entry?;
            let stored: StoredId =
                serde_json::from_slice(&value).context("Failed to decode stored holding")?;
            if stored.id == *id {
                partition.remove(key.to_vec())?;
                self.keyspace.persist(PersistMode::SyncAll)?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl HoldingsStore for DiskHoldings {
    fn list_coins(&self) -> Result<Vec<Coin>> {
        Self::list(&self.coins)
    }

    fn list_jewellery(&self) -> Result<Vec<Jewellery>> {
        Self::list(&self.jewellery)
    }

    fn add_coin(&self, coin: Coin) -> Result<()> {
        debug!("Storing coin {} ({})", coin.name, coin.id);
        self.append(&self.coins, &coin)
    }

    fn add_jewellery(&self, item: Jewellery) -> Result<()> {
        debug!("Storing jewellery {} ({})", item.name, item.id);
        self.append(&self.jewellery, &item)
    }

    fn remove(&self, id: &Uuid) -> Result<bool> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Holdings lock poisoned"))?;
        if self.remove_from(&self.coins, id)? {
            return Ok(true);
        }
        self.remove_from(&self.jewellery, id)
    }
}

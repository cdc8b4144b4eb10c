//! Holdings (coins and jewellery) and the store abstraction that owns them

use crate::core::units::{Metal, WeightUnit, to_grams};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_COIN_WEIGHT: f64 = 1.0;
pub const DEFAULT_COIN_WEIGHT_UNIT: WeightUnit = WeightUnit::Ounces;
pub const DEFAULT_JEWELLERY_WEIGHT_UNIT: WeightUnit = WeightUnit::Grams;

/// Common bullion coin sizes in troy ounces.
pub const STANDARD_COIN_OUNCES: [f64; 4] = [0.1, 0.25, 0.5, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: Uuid,
    pub name: String,
    pub metal: Metal,
    pub quantity: u32,
    /// Weight of a single coin.
    pub weight: f64,
    pub weight_unit: WeightUnit,
}

impl Coin {
    pub fn new(
        name: &str,
        metal: Metal,
        quantity: u32,
        weight: f64,
        weight_unit: WeightUnit,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            bail!("Coin name must not be empty");
        }
        if quantity == 0 {
            bail!("Coin quantity must be positive");
        }
        if !weight.is_finite() || weight <= 0.0 {
            bail!("Coin weight must be positive, got {weight}");
        }
        Ok(Coin {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            metal,
            quantity,
            weight,
            weight_unit,
        })
    }

    /// Whether the coin is one of the common bullion sizes. Coins weighed in
    /// grams are not checked.
    pub fn is_standard_size(&self) -> bool {
        self.weight_unit != WeightUnit::Ounces
            || STANDARD_COIN_OUNCES
                .iter()
                .any(|size| (size - self.weight).abs() < 1e-9)
    }

    /// Total weight of the holding (all coins) in grams.
    pub fn total_grams(&self) -> f64 {
        to_grams(self.weight * self.quantity as f64, self.weight_unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jewellery {
    pub id: Uuid,
    pub name: String,
    pub metal: Metal,
    /// Total weight of the item.
    pub weight: f64,
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub karat: Option<u32>,
}

impl Jewellery {
    /// Creates a jewellery item. A karat is only kept for gold items.
    pub fn new(
        name: &str,
        metal: Metal,
        weight: f64,
        weight_unit: WeightUnit,
        description: Option<String>,
        karat: Option<u32>,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            bail!("Jewellery name must not be empty");
        }
        if !weight.is_finite() || weight <= 0.0 {
            bail!("Jewellery weight must be positive, got {weight}");
        }
        if karat == Some(0) {
            bail!("Karat must be positive");
        }
        Ok(Jewellery {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            metal,
            weight,
            weight_unit,
            description: description.filter(|d| !d.trim().is_empty()),
            karat: if metal == Metal::Gold { karat } else { None },
        })
    }

    pub fn total_grams(&self) -> f64 {
        to_grams(self.weight, self.weight_unit)
    }
}

/// Durable collection of holdings.
///
/// Listing returns items in insertion order, and two reads without a write in
/// between return identical lists.
pub trait HoldingsStore: Send + Sync {
    fn list_coins(&self) -> Result<Vec<Coin>>;
    fn list_jewellery(&self) -> Result<Vec<Jewellery>>;
    fn add_coin(&self, coin: Coin) -> Result<()>;
    fn add_jewellery(&self, item: Jewellery) -> Result<()>;
    /// Removes a coin or jewellery item. Returns `false` when the id is unknown.
    fn remove(&self, id: &Uuid) -> Result<bool>;
}

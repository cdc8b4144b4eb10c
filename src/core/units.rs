//! Metals and weight units

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Grams in one troy ounce. Used for holdings and Nisab thresholds alike.
pub const OUNCE_TO_GRAMS: f64 = 31.1035;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    Gold,
    Silver,
}

impl Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Metal::Gold => "Gold",
                Metal::Silver => "Silver",
            }
        )
    }
}

impl FromStr for Metal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" | "au" => Ok(Metal::Gold),
            "silver" | "ag" => Ok(Metal::Silver),
            _ => Err(anyhow::anyhow!("Invalid metal: {}", s)),
        }
    }
}

/// Weight unit of a holding. `Ounces` are troy ounces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    Ounces,
    Grams,
}

impl Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WeightUnit::Ounces => "oz",
                WeightUnit::Grams => "g",
            }
        )
    }
}

impl FromStr for WeightUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Ounces),
            "g" | "gram" | "grams" => Ok(WeightUnit::Grams),
            _ => Err(anyhow::anyhow!("Invalid weight unit: {}", s)),
        }
    }
}

/// Normalizes a weight to grams.
pub fn to_grams(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Grams => weight,
        WeightUnit::Ounces => weight * OUNCE_TO_GRAMS,
    }
}

use super::ui;
use crate::core::holdings::{Coin, HoldingsStore, Jewellery, STANDARD_COIN_OUNCES};
use crate::core::purity::{RECOGNIZED_KARATS, is_recognized_karat};
use crate::core::units::{Metal, WeightUnit};
use anyhow::{Result, bail};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewCoin {
    pub name: String,
    pub metal: Metal,
    pub quantity: u32,
    pub weight: f64,
    pub unit: WeightUnit,
}

#[derive(Debug, Clone)]
pub struct NewJewellery {
    pub name: String,
    pub metal: Metal,
    pub weight: f64,
    pub unit: WeightUnit,
    pub description: Option<String>,
    pub karat: Option<u32>,
}

fn join_sizes<T: ToString>(sizes: &[T]) -> String {
    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Note shown for a coin that is not a common bullion size.
pub fn coin_note(coin: &Coin) -> Option<String> {
    (!coin.is_standard_size()).then(|| {
        format!(
            "{} oz is not a standard coin size ({} oz)",
            coin.weight,
            join_sizes(&STANDARD_COIN_OUNCES)
        )
    })
}

/// Note shown for gold jewellery whose karat has no known purity.
pub fn jewellery_note(item: &Jewellery) -> Option<String> {
    item.karat.filter(|k| !is_recognized_karat(*k)).map(|k| {
        format!(
            "{k}K is not one of {}K, the item is valued at full fineness",
            join_sizes(&RECOGNIZED_KARATS)
        )
    })
}

fn print_note(note: Option<String>) {
    if let Some(note) = note {
        warn!("{note}");
        println!("{}", ui::style_text(&format!("Note: {note}"), ui::StyleType::Subtle));
    }
}

pub fn add_coin(store: &dyn HoldingsStore, new: NewCoin) -> Result<Coin> {
    let coin = Coin::new(&new.name, new.metal, new.quantity, new.weight, new.unit)?;
    store.add_coin(coin.clone())?;
    println!(
        "{} {} x {} ({} {}{})",
        ui::style_text("Coin added successfully!", ui::StyleType::TotalValue),
        coin.quantity,
        coin.name,
        coin.metal,
        coin.weight,
        coin.weight_unit
    );
    print_note(coin_note(&coin));
    Ok(coin)
}

pub fn add_jewellery(store: &dyn HoldingsStore, new: NewJewellery) -> Result<Jewellery> {
    let item = Jewellery::new(
        &new.name,
        new.metal,
        new.weight,
        new.unit,
        new.description,
        new.karat,
    )?;
    store.add_jewellery(item.clone())?;
    println!(
        "{} {} ({} {}{})",
        ui::style_text("Jewellery added successfully!", ui::StyleType::TotalValue),
        item.name,
        item.metal,
        item.weight,
        item.weight_unit
    );
    print_note(jewellery_note(&item));
    Ok(item)
}

/// Finds the holding whose id starts with `prefix`. The prefix must be unambiguous.
pub fn resolve_id(store: &dyn HoldingsStore, prefix: &str) -> Result<Uuid> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        bail!("Holding id must not be empty");
    }

    let ids: Vec<Uuid> = store
        .list_coins()?
        .iter()
        .map(|c| c.id)
        .chain(store.list_jewellery()?.iter().map(|j| j.id))
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match ids.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No holding found with id {prefix}"),
        _ => bail!("Id {prefix} matches {} holdings, use more characters", ids.len()),
    }
}

pub fn remove(store: &dyn HoldingsStore, prefix: &str) -> Result<()> {
    let id = resolve_id(store, prefix)?;
    debug!("Resolved {prefix} to {id}");
    if !store.remove(&id)? {
        bail!("No holding found with id {id}");
    }
    println!("Removed holding {id}");
    Ok(())
}

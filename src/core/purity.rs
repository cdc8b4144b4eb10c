//! Gold purity (karat) adjustment

/// Karat assumed for gold items that do not state one.
pub const DEFAULT_KARAT: u32 = 24;

/// Karat values with a known purity. Anything else counts as full fineness.
pub const RECOGNIZED_KARATS: [u32; 4] = [24, 22, 18, 9];

pub fn is_recognized_karat(karat: u32) -> bool {
    RECOGNIZED_KARATS.contains(&karat)
}

/// Returns the fraction of fine gold in an alloy of the given karat.
///
/// Unrecognized karat values fall back to `1.0` instead of being rejected.
pub fn purity_factor(karat: u32) -> f64 {
    match karat {
        24 => 1.0,
        22 => 22.0 / 24.0,
        18 => 18.0 / 24.0,
        9 => 9.0 / 24.0,
        _ => 1.0,
    }
}

/// Purity factor for an optional karat, applying [`DEFAULT_KARAT`] when absent.
pub fn effective_purity(karat: Option<u32>) -> f64 {
    purity_factor(karat.unwrap_or(DEFAULT_KARAT))
}

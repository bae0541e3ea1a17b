//! Normalization of host-supplied values before they reach the planner.
//!
//! Anything that is not a non-negative finite number becomes zero, so the
//! planning functions only ever see valid quantities.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use crate::inventory::Inventory;
use crate::types::ResourcePool;

/// Map full-width ASCII variants (digits, punctuation, letters) to ASCII.
fn to_half_width(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' => ' ',
        _ => c,
    }
}

/// Parse a typed quantity like `"12,500"`, `"1.5k"`, `"３Ｍ"` or `"2g"`.
///
/// Fractions are floored. Empty, negative, non-numeric and non-finite input
/// yields 0; values too large for `u64` saturate.
pub fn parse_quantity(raw: &str) -> u64 {
    let cleaned: String = raw
        .chars()
        .map(to_half_width)
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() {
        return 0;
    }

    let (number, multiplier) = match cleaned.chars().last() {
        Some('k') => (&cleaned[..cleaned.len() - 1], Decimal::from(1_000u64)),
        Some('m') => (&cleaned[..cleaned.len() - 1], Decimal::from(1_000_000u64)),
        Some('g') => (&cleaned[..cleaned.len() - 1], Decimal::from(1_000_000_000u64)),
        _ => (cleaned.as_str(), Decimal::ONE),
    };

    let Ok(value) = Decimal::from_str(number) else {
        return 0;
    };
    if value.is_sign_negative() {
        return 0;
    }

    match value.checked_mul(multiplier) {
        Some(scaled) => scaled.floor().to_u64().unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// Clamp a numeric value to a quantity: NaN, infinities and negatives are 0.
pub fn quantity_from_f64(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= u64::MAX as f64 {
        return u64::MAX;
    }
    value.floor() as u64
}

/// Build an inventory from raw name → text pairs. Unknown names are
/// ignored; names that never appear stay at zero.
pub fn normalize_inventory<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Inventory
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut inventory = Inventory::new();
    for (name, raw) in fields {
        match name.as_ref().parse::<ResourcePool>() {
            Ok(pool) => inventory.set(pool, parse_quantity(raw.as_ref())),
            Err(_) => log::debug!("ignoring unknown inventory field {:?}", name.as_ref()),
        }
    }
    inventory
}

//! Inventory model: what the player holds, one quantity per resource pool.
//!
//! All consumption goes through [`Inventory::draw`], which checks the full
//! amount is covered before deducting anything, so a quantity can never go
//! negative. Category speed-up pools fall back on the general speed-up pool
//! for any shortfall; see [`ResourcePool::backing_pool`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::ResourcePool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct Inventory {
    quantities: [u64; ResourcePool::ALL.len()],
}

/// How one payment was split between a pool and its backing pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub pool: ResourcePool,
    pub from_dedicated: u64,
    pub from_backing: u64,
}

impl Draw {
    pub fn total(&self) -> u64 {
        self.from_dedicated + self.from_backing
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, pool: ResourcePool, quantity: u64) -> Self {
        self.set(pool, quantity);
        self
    }

    pub fn get(&self, pool: ResourcePool) -> u64 {
        self.quantities[pool.index()]
    }

    pub fn set(&mut self, pool: ResourcePool, quantity: u64) {
        self.quantities[pool.index()] = quantity;
    }

    pub fn add(&mut self, pool: ResourcePool, quantity: u64) {
        let slot = &mut self.quantities[pool.index()];
        *slot = slot.saturating_add(quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.iter().all(|&q| q == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourcePool, u64)> + '_ {
        ResourcePool::ALL.iter().map(move |&pool| (pool, self.get(pool)))
    }

    /// Quantity a quest paid from `pool` can spend, counting the backing pool.
    pub fn available_for(&self, pool: ResourcePool) -> u64 {
        let backing = pool.backing_pool().map_or(0, |b| self.get(b));
        self.get(pool).saturating_add(backing)
    }

    /// Whole completions of a `cost`-sized quest the pool can fund.
    pub fn completions_affordable(&self, pool: ResourcePool, cost: u64) -> u64 {
        if cost == 0 {
            return 0;
        }
        self.available_for(pool) / cost
    }

    /// Deduct `amount` from `pool`, dedicated quantity first and the backing
    /// pool for the remainder. Returns `None` and leaves the inventory
    /// untouched when the combined quantity does not cover `amount`.
    pub fn draw(&mut self, pool: ResourcePool, amount: u64) -> Option<Draw> {
        if self.available_for(pool) < amount {
            return None;
        }

        let from_dedicated = amount.min(self.get(pool));
        let from_backing = amount - from_dedicated;
        self.quantities[pool.index()] -= from_dedicated;
        // a shortfall past the check above implies a backing pool exists
        if let Some(backing) = pool.backing_pool() {
            self.quantities[backing.index()] -= from_backing;
        }

        Some(Draw {
            pool,
            from_dedicated,
            from_backing,
        })
    }

    /// Per-pool difference `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &Inventory) -> Inventory {
        let mut out = Inventory::new();
        for pool in ResourcePool::ALL {
            out.set(pool, self.get(pool).saturating_sub(other.get(pool)));
        }
        out
    }

    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(pool, qty)| (pool.as_str().to_string(), qty))
            .collect()
    }

    /// Build from a flat name → quantity map. Unknown names are ignored and
    /// missing ones stay at zero.
    pub fn from_map<'a>(map: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut inventory = Inventory::new();
        for (name, qty) in map {
            match name.parse::<ResourcePool>() {
                Ok(pool) => inventory.set(pool, qty),
                Err(_) => log::debug!("ignoring unknown inventory key {:?}", name),
            }
        }
        inventory
    }
}

impl From<BTreeMap<String, u64>> for Inventory {
    fn from(map: BTreeMap<String, u64>) -> Self {
        Inventory::from_map(map.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

impl From<Inventory> for BTreeMap<String, u64> {
    fn from(inventory: Inventory) -> Self {
        inventory.to_map()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pool, qty) in self.iter() {
            writeln!(f, "  {:<18} {:>12} {}", pool.as_str(), qty, pool.unit())?;
        }
        Ok(())
    }
}

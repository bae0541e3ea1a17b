use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{QuestCatalog, QuestVariant};
use crate::inventory::Inventory;
use crate::types::{QuestTypeId, ResourcePool};

/// One variant and whether a single completion of it is affordable now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAvailability {
    pub quest_type: QuestTypeId,
    pub label: String,
    pub pool: ResourcePool,
    pub variant: QuestVariant,
    /// Quantity this quest type may spend, backing pool included.
    pub available: u64,
    pub affordable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub possible: Vec<VariantAvailability>,
    pub impossible: Vec<VariantAvailability>,
}

/// Split every catalog variant into affordable and not, each list ordered
/// lowest rank first, then by cost per point, then catalog order.
pub fn quest_availability(inventory: &Inventory, catalog: &QuestCatalog) -> Availability {
    let mut availability = Availability::default();

    for quest in catalog.iter() {
        let available = inventory.available_for(quest.pool);
        for variant in &quest.variants {
            let item = VariantAvailability {
                quest_type: quest.id.clone(),
                label: quest.label.clone(),
                pool: quest.pool,
                variant: *variant,
                available,
                affordable: available >= variant.cost,
            };
            if item.affordable {
                availability.possible.push(item);
            } else {
                availability.impossible.push(item);
            }
        }
    }

    // stable sort keeps catalog order on full ties
    let by_rank_then_efficiency = |a: &VariantAvailability, b: &VariantAvailability| {
        a.variant
            .rank
            .cmp(&b.variant.rank)
            .then_with(|| a.variant.cmp_efficiency(&b.variant))
    };
    availability.possible.sort_by(by_rank_then_efficiency);
    availability.impossible.sort_by(by_rank_then_efficiency);
    availability
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Affordable now ({}):", self.possible.len())?;
        for item in &self.possible {
            write_item(f, item)?;
        }
        writeln!(f, "Out of reach ({}):", self.impossible.len())?;
        for item in &self.impossible {
            write_item(f, item)?;
        }
        Ok(())
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, item: &VariantAvailability) -> fmt::Result {
    writeln!(
        f,
        "  [{:<6}] {:<22} {:>8} {} -> {:>4} pts  ({:.1}/pt, have {})",
        item.variant.rank,
        item.label,
        item.variant.cost,
        item.pool.unit(),
        item.variant.points,
        item.variant.efficiency(),
        item.available
    )
}

//! Quest catalog: the static table of quest types and their reward variants.
//!
//! The table is host-supplied data. [`QuestCatalog::standard`] carries the
//! built-in table; a file in JSON or YAML with the same shape can replace it
//! without touching the allocation logic.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::PlannerError;
use crate::types::{QuestTypeId, Rank, ResourcePool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestVariant {
    pub cost: u64,
    pub points: u64,
    pub rank: Rank,
}

impl QuestVariant {
    pub const fn new(cost: u64, points: u64, rank: Rank) -> Self {
        Self { cost, points, rank }
    }

    /// `cost / points` ordering without floating point. Zero-point
    /// variants sort last.
    pub fn cmp_efficiency(&self, other: &QuestVariant) -> Ordering {
        match (self.points, other.points) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Greater,
            (_, 0) => Ordering::Less,
            _ => {
                let lhs = self.cost as u128 * other.points as u128;
                let rhs = other.cost as u128 * self.points as u128;
                lhs.cmp(&rhs)
            }
        }
    }

    /// Cost per point as a float, for display only.
    pub fn efficiency(&self) -> f64 {
        if self.points == 0 {
            f64::INFINITY
        } else {
            self.cost as f64 / self.points as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestType {
    pub id: QuestTypeId,
    pub label: String,
    #[serde(rename = "resource_pool")]
    pub pool: ResourcePool,
    pub variants: Vec<QuestVariant>,
}

impl QuestType {
    pub fn new(id: &str, label: &str, pool: ResourcePool, variants: Vec<QuestVariant>) -> Self {
        Self {
            id: QuestTypeId::new(id),
            label: label.to_string(),
            pool,
            variants,
        }
    }

    /// Lowest-cost variant; among equal costs the one worth the most points.
    pub fn cheapest(&self) -> Option<&QuestVariant> {
        self.variants
            .iter()
            .filter(|v| v.cost > 0)
            .min_by_key(|v| (v.cost, Reverse(v.points)))
    }

    pub fn by_points(&self) -> Vec<&QuestVariant> {
        let mut sorted: Vec<&QuestVariant> = self.variants.iter().collect();
        sorted.sort_by_key(|v| (v.points, v.cost));
        sorted
    }

    /// Variants worth more points than `current` and costing no less,
    /// cheapest upgrade first.
    pub fn upgrades_from(&self, current: &QuestVariant) -> Vec<&QuestVariant> {
        let mut upgrades: Vec<&QuestVariant> = self
            .variants
            .iter()
            .filter(|v| v.points > current.points && v.cost >= current.cost)
            .collect();
        upgrades.sort_by_key(|v| (v.cost, Reverse(v.points)));
        upgrades
    }

    /// True when a higher cost never buys fewer points.
    pub fn is_monotonic(&self) -> bool {
        let mut sorted: Vec<&QuestVariant> = self.variants.iter().collect();
        sorted.sort_by_key(|v| (v.cost, v.points));
        sorted.windows(2).all(|w| w[0].points <= w[1].points)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCatalog {
    #[serde(default)]
    pub version: String,
    pub quest_types: Vec<QuestType>,
}

impl QuestCatalog {
    pub fn new(version: &str, quest_types: Vec<QuestType>) -> Self {
        Self {
            version: version.to_string(),
            quest_types,
        }
    }

    pub fn get(&self, id: &QuestTypeId) -> Option<&QuestType> {
        self.quest_types.iter().find(|q| &q.id == id)
    }

    pub fn position(&self, id: &QuestTypeId) -> Option<usize> {
        self.quest_types.iter().position(|q| &q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestType> {
        self.quest_types.iter()
    }

    pub fn len(&self) -> usize {
        self.quest_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quest_types.is_empty()
    }

    /// Order in which Phase 1 fills quest types: types on unshared pools
    /// first, then the category speed-ups that can fall back on the general
    /// pool, then the general pool's own quests. Catalog order within a group.
    pub fn processing_order(&self) -> Vec<&QuestType> {
        let group = |pool: ResourcePool| {
            if pool.is_shared() {
                2
            } else if pool.backing_pool().is_some() {
                1
            } else {
                0
            }
        };
        let mut ordered: Vec<&QuestType> = self.quest_types.iter().collect();
        ordered.sort_by_key(|q| group(q.pool));
        ordered
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.quest_types.is_empty() {
            return Err(PlannerError::InvalidCatalog(
                "catalog must have at least one quest type".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for quest in &self.quest_types {
            if !seen.insert(&quest.id) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "duplicate quest type {}",
                    quest.id
                )));
            }
            if quest.variants.is_empty() {
                return Err(PlannerError::InvalidCatalog(format!(
                    "quest type {} has no variants",
                    quest.id
                )));
            }
            if quest.variants.iter().any(|v| v.cost == 0) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "quest type {} has a zero-cost variant",
                    quest.id
                )));
            }
            if !quest.is_monotonic() {
                log::warn!(
                    "quest type {} has a costlier variant worth fewer points",
                    quest.id
                );
            }
        }

        Ok(())
    }

    /// Load a catalog from JSON, or YAML when the extension is `.yaml`/`.yml`.
    pub fn load_from_file(path: &Path) -> Result<Self, PlannerError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: Self = if is_yaml(path) {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), PlannerError> {
        let text = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, text)?;
        Ok(())
    }

    /// The built-in mobilization table.
    pub fn standard() -> Self {
        use Rank::{Blue, Gold, Purple};

        let speedup = || {
            vec![
                QuestVariant::new(7200, 450, Gold),
                QuestVariant::new(3600, 300, Gold),
                QuestVariant::new(1800, 220, Purple),
                QuestVariant::new(900, 160, Blue),
            ]
        };

        Self::new(
            "standard",
            vec![
                QuestType::new(
                    "speedup_general",
                    "General Speed-up",
                    ResourcePool::SpeedupGeneral,
                    speedup(),
                ),
                QuestType::new(
                    "speedup_troop",
                    "Troop Speed-up",
                    ResourcePool::SpeedupTroop,
                    speedup(),
                ),
                QuestType::new(
                    "speedup_building",
                    "Building Speed-up",
                    ResourcePool::SpeedupBuilding,
                    speedup(),
                ),
                QuestType::new(
                    "speedup_research",
                    "Research Speed-up",
                    ResourcePool::SpeedupResearch,
                    speedup(),
                ),
                QuestType::new(
                    "hammer",
                    "Hammer Spend",
                    ResourcePool::Hammers,
                    vec![
                        QuestVariant::new(35, 550, Gold),
                        QuestVariant::new(20, 400, Gold),
                        QuestVariant::new(10, 300, Purple),
                    ],
                ),
                QuestType::new(
                    "hero_shards",
                    "Legendary Hero Shards",
                    ResourcePool::HeroShards,
                    vec![
                        QuestVariant::new(68, 490, Gold),
                        QuestVariant::new(30, 320, Gold),
                        QuestVariant::new(10, 200, Purple),
                    ],
                ),
                QuestType::new(
                    "diamonds",
                    "Diamond Spend",
                    ResourcePool::Diamonds,
                    vec![
                        QuestVariant::new(50000, 670, Gold),
                        QuestVariant::new(30000, 460, Gold),
                        QuestVariant::new(15000, 360, Purple),
                        QuestVariant::new(10000, 280, Purple),
                        QuestVariant::new(5000, 200, Blue),
                    ],
                ),
                QuestType::new(
                    "wild_beast",
                    "Wild Beast Hunt",
                    ResourcePool::Stamina,
                    vec![
                        QuestVariant::new(300, 300, Gold),
                        QuestVariant::new(200, 240, Purple),
                        QuestVariant::new(150, 200, Purple),
                        QuestVariant::new(100, 160, Blue),
                        QuestVariant::new(50, 120, Blue),
                    ],
                ),
            ],
        )
    }
}

impl Default for QuestCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for QuestCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalog: {}", self.version)?;
        for quest in &self.quest_types {
            writeln!(f, "\n  {} ({}, paid from {})", quest.label, quest.id, quest.pool)?;
            for v in quest.by_points() {
                writeln!(
                    f,
                    "    [{:<6}] {:>8} {} -> {:>5} pts",
                    v.rank,
                    v.cost,
                    quest.pool.unit(),
                    v.points
                )?;
            }
        }
        Ok(())
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

/// One inventory slot. Every quest type is paid from exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourcePool {
    Diamonds,
    Hammers,
    HeroShards,
    Stamina,
    SpeedupGeneral,
    SpeedupTroop,
    SpeedupBuilding,
    SpeedupResearch,
}

impl ResourcePool {
    pub const ALL: [ResourcePool; 8] = [
        ResourcePool::Diamonds,
        ResourcePool::Hammers,
        ResourcePool::HeroShards,
        ResourcePool::Stamina,
        ResourcePool::SpeedupGeneral,
        ResourcePool::SpeedupTroop,
        ResourcePool::SpeedupBuilding,
        ResourcePool::SpeedupResearch,
    ];

    /// Get the string identifier used in stores and catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourcePool::Diamonds => "diamonds",
            ResourcePool::Hammers => "hammers",
            ResourcePool::HeroShards => "hero_shards",
            ResourcePool::Stamina => "stamina",
            ResourcePool::SpeedupGeneral => "speedup_general",
            ResourcePool::SpeedupTroop => "speedup_troop",
            ResourcePool::SpeedupBuilding => "speedup_building",
            ResourcePool::SpeedupResearch => "speedup_research",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The shared pool that covers any shortfall in this one.
    ///
    /// Only the three category speed-ups are backed, and only by
    /// `SpeedupGeneral`. The relation never runs the other way.
    pub fn backing_pool(self) -> Option<ResourcePool> {
        match self {
            ResourcePool::SpeedupTroop
            | ResourcePool::SpeedupBuilding
            | ResourcePool::SpeedupResearch => Some(ResourcePool::SpeedupGeneral),
            _ => None,
        }
    }

    /// True for pools other quest types may draw from.
    pub fn is_shared(self) -> bool {
        self == ResourcePool::SpeedupGeneral
    }

    /// Unit label for display; speed-ups are counted in minutes.
    pub fn unit(self) -> &'static str {
        match self {
            ResourcePool::Stamina => "stamina",
            ResourcePool::SpeedupGeneral
            | ResourcePool::SpeedupTroop
            | ResourcePool::SpeedupBuilding
            | ResourcePool::SpeedupResearch => "min",
            _ => "pcs",
        }
    }
}

impl fmt::Display for ResourcePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourcePool {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "diamonds" => Ok(ResourcePool::Diamonds),
            "hammers" | "hammer" => Ok(ResourcePool::Hammers),
            "hero_shards" => Ok(ResourcePool::HeroShards),
            "stamina" => Ok(ResourcePool::Stamina),
            "speedup_general" | "speedup_general_mins" => Ok(ResourcePool::SpeedupGeneral),
            "speedup_troop" | "speedup_troop_mins" => Ok(ResourcePool::SpeedupTroop),
            "speedup_building" | "speedup_building_mins" => Ok(ResourcePool::SpeedupBuilding),
            "speedup_research" | "speedup_research_mins" => Ok(ResourcePool::SpeedupResearch),
            _ => Err(PlannerError::UnknownPool(s.to_string())),
        }
    }
}

/// Coarse reward tier of a quest variant. Display grouping and sort
/// tie-breaks only; the allocation math never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    #[serde(alias = "low")]
    Blue,
    #[serde(alias = "mid")]
    Purple,
    #[serde(alias = "high")]
    Gold,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Blue => "blue",
            Rank::Purple => "purple",
            Rank::Gold => "gold",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier for a quest type in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestTypeId(pub String);

impl QuestTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::QuestVariant;
use crate::inventory::Draw;
use crate::types::QuestTypeId;

/// One decision taken while building a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEvent {
    pub step: usize,
    pub quest_type: Option<QuestTypeId>,
    pub event_type: PlanEventType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlanEventType {
    Filled {
        variant: QuestVariant,
        count: u64,
        draw: Draw,
    },
    Skipped {
        reason: SkipReason,
    },
    Upgraded {
        from: QuestVariant,
        to: QuestVariant,
        count: u64,
        draw: Draw,
    },
    UpgradeRejected {
        from: QuestVariant,
        to: QuestVariant,
        marginal_cost: u64,
        available: u64,
    },
    PassCompleted {
        pass: usize,
        upgrades: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    TargetReached,
    NoVariants,
    Unaffordable { available: u64, cheapest_cost: u64 },
}

impl fmt::Display for PlanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quest_type {
            Some(id) => write!(f, "[{}] {}: ", self.step, id)?,
            None => write!(f, "[{}] ", self.step)?,
        }

        match &self.event_type {
            PlanEventType::Filled {
                variant,
                count,
                draw,
            } => {
                write!(
                    f,
                    "Filled {} x {} ({} -> {} pts)",
                    count, variant.rank, variant.cost, variant.points
                )?;
                write_draw(f, draw)
            }
            PlanEventType::Skipped { reason } => match reason {
                SkipReason::TargetReached => write!(f, "Skipped, target already reached"),
                SkipReason::NoVariants => write!(f, "Skipped, no payable variants"),
                SkipReason::Unaffordable {
                    available,
                    cheapest_cost,
                } => write!(
                    f,
                    "Skipped, {} available < cheapest cost {}",
                    available, cheapest_cost
                ),
            },
            PlanEventType::Upgraded {
                from,
                to,
                count,
                draw,
            } => {
                write!(
                    f,
                    "Upgraded {} x {}/{} -> {}/{}",
                    count, from.cost, from.points, to.cost, to.points
                )?;
                write_draw(f, draw)
            }
            PlanEventType::UpgradeRejected {
                from,
                to,
                marginal_cost,
                available,
            } => write!(
                f,
                "Kept {}/{}, upgrade to {}/{} needs {} more but {} available",
                from.cost, from.points, to.cost, to.points, marginal_cost, available
            ),
            PlanEventType::PassCompleted { pass, upgrades } => {
                write!(f, "Upgrade pass {} done, {} upgrades", pass, upgrades)
            }
        }
    }
}

fn write_draw(f: &mut fmt::Formatter<'_>, draw: &Draw) -> fmt::Result {
    if draw.from_backing > 0 {
        write!(
            f,
            ", paid {} from {} + {} from general",
            draw.from_dedicated, draw.pool, draw.from_backing
        )
    } else {
        write!(f, ", paid {} from {}", draw.from_dedicated, draw.pool)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanTrace {
    events: Vec<PlanEvent>,
}

impl PlanTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, quest_type: Option<&QuestTypeId>, event_type: PlanEventType) {
        let step = self.events.len();
        self.events.push(PlanEvent {
            step,
            quest_type: quest_type.cloned(),
            event_type,
        });
    }

    pub fn events(&self) -> &[PlanEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of everything drawn by fills and upgrades.
    pub fn total_drawn(&self) -> u64 {
        self.events
            .iter()
            .map(|e| match &e.event_type {
                PlanEventType::Filled { draw, .. } | PlanEventType::Upgraded { draw, .. } => {
                    draw.total()
                }
                _ => 0,
            })
            .sum()
    }
}

impl fmt::Display for PlanTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

//! Allocation engine: spend an inventory snapshot on quest completions.
//!
//! Planning runs in two phases over a private copy of the inventory:
//!
//! - **Fill**: every quest type takes as many completions of its cheapest
//!   variant as its pool can pay for, up to the remaining room under the
//!   target. Unshared pools go first, then the category speed-ups on their
//!   dedicated minutes alone. The general pool is spent last and only as
//!   needed: first to finish category completions that are partly paid for,
//!   smallest shortfall first, then on whole completions of the cheapest
//!   speed-up quest.
//! - **Upgrade**: leftover resources are spent swapping already-planned
//!   completions for higher-point variants of the same quest type. Entries
//!   are visited from fewest points to most; each tries its upgrades from
//!   the cheapest marginal cost up and takes the first it can afford. One
//!   step per entry per pass; passes repeat until nothing changes.
//!
//! This is a greedy heuristic, not an optimal knapsack solution. Completion
//! count is decided by the fill phase and never changed by the upgrade phase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{QuestCatalog, QuestType, QuestVariant};
use crate::inventory::{Draw, Inventory};
use crate::trace::{PlanEventType, PlanTrace, SkipReason};
use crate::types::{QuestTypeId, ResourcePool};

/// Whether the fill phase stops at the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Never plan more completions than the target.
    #[default]
    Capped,
    /// Let every pool fill completely; the total may pass the target.
    Unconstrained,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub quest_type: QuestTypeId,
    pub pool: ResourcePool,
    pub variant: QuestVariant,
    pub count: u64,
}

impl PlanEntry {
    pub fn points(&self) -> u64 {
        self.variant.points.saturating_mul(self.count)
    }

    pub fn cost(&self) -> u64 {
        self.variant.cost.saturating_mul(self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub target: u64,
    pub mode: FillMode,
    pub entries: Vec<PlanEntry>,
    pub total_points: u64,
    pub total_quests: u64,
    /// What is left after every planned completion is paid for.
    pub residual: Inventory,
    /// What was taken from each pool. Backing-pool shortfalls are credited
    /// to the pool that actually paid.
    pub drawn: Inventory,
    pub trace: PlanTrace,
}

/// Per quest type totals, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub quest_type: QuestTypeId,
    pub label: String,
    pub quests: u64,
    pub points: u64,
}

impl AllocationPlan {
    fn empty(inventory: Inventory, target: u64, mode: FillMode) -> Self {
        Self {
            target,
            mode,
            entries: Vec::new(),
            total_points: 0,
            total_quests: 0,
            residual: inventory,
            drawn: Inventory::new(),
            trace: PlanTrace::new(),
        }
    }

    pub fn met_target(&self) -> bool {
        self.total_quests >= self.target
    }

    pub fn missing(&self) -> u64 {
        self.target.saturating_sub(self.total_quests)
    }

    pub fn entries_for<'a>(
        &'a self,
        id: &QuestTypeId,
    ) -> impl Iterator<Item = &'a PlanEntry> + use<'a> {
        let id = id.clone();
        self.entries.iter().filter(move |e| e.quest_type == id)
    }

    /// Totals per quest type, in catalog order, skipping types with no work.
    pub fn summary(&self, catalog: &QuestCatalog) -> Vec<TypeSummary> {
        catalog
            .iter()
            .filter_map(|quest| {
                let (quests, points) = self
                    .entries_for(&quest.id)
                    .fold((0u64, 0u64), |(q, p), e| {
                        (q.saturating_add(e.count), p.saturating_add(e.points()))
                    });
                (quests > 0).then(|| TypeSummary {
                    quest_type: quest.id.clone(),
                    label: quest.label.clone(),
                    quests,
                    points,
                })
            })
            .collect()
    }

    fn recompute_totals(&mut self) {
        self.total_quests = self
            .entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.count));
        self.total_points = self
            .entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.points()));
    }
}

impl fmt::Display for AllocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Plan: {} quests, {} points (target {}{})",
            self.total_quests,
            self.total_points,
            self.target,
            if self.met_target() { ", met" } else { "" }
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {:<18} [{:<6}] {:>8} {} / {:>4} pts x {:>3} = {:>6} pts",
                entry.quest_type.as_str(),
                entry.variant.rank,
                entry.variant.cost,
                entry.pool.unit(),
                entry.variant.points,
                entry.count,
                entry.points()
            )?;
        }
        writeln!(f, "Remaining:")?;
        write!(f, "{}", self.residual)
    }
}

/// Plan with the default [`FillMode::Capped`].
pub fn allocate(inventory: &Inventory, catalog: &QuestCatalog, target: u64) -> AllocationPlan {
    allocate_with(inventory, catalog, target, FillMode::default())
}

pub fn allocate_with(
    inventory: &Inventory,
    catalog: &QuestCatalog,
    target: u64,
    mode: FillMode,
) -> AllocationPlan {
    // Copy-on-read: the caller's inventory is never touched.
    let snapshot = *inventory;
    let mut plan = AllocationPlan::empty(snapshot, target, mode);
    if target == 0 || snapshot.is_empty() {
        return plan;
    }

    fill(&mut plan, catalog);
    let filled = plan.total_quests;
    upgrade(&mut plan, catalog);
    debug_assert_eq!(filled, plan.total_quests);

    log::info!(
        "planned {} quests for {} points (target {})",
        plan.total_quests,
        plan.total_points,
        target
    );
    plan
}

fn credit(drawn: &mut Inventory, draw: &Draw) {
    drawn.add(draw.pool, draw.from_dedicated);
    if let Some(backing) = draw.pool.backing_pool() {
        drawn.add(backing, draw.from_backing);
    }
}

fn room(plan: &AllocationPlan) -> u64 {
    match plan.mode {
        FillMode::Capped => plan.target.saturating_sub(plan.total_quests),
        FillMode::Unconstrained => u64::MAX,
    }
}

fn fill(plan: &mut AllocationPlan, catalog: &QuestCatalog) {
    let order = catalog.processing_order();

    // Unshared pools, then every category speed-up on its own minutes only.
    for quest in order.iter().filter(|q| !q.pool.is_shared()) {
        if let Some(cheapest) = quest.cheapest().copied() {
            let affordable = plan.residual.get(quest.pool) / cheapest.cost;
            fill_type(plan, quest, cheapest, affordable);
        }
    }

    top_up_from_backing(plan, &order);

    // Whatever general minutes are left go to the cheapest consumer. Ties
    // keep processing order, so category speed-ups come before general.
    let mut consumers: Vec<(&QuestType, QuestVariant)> = order
        .iter()
        .filter(|q| q.pool.is_shared() || q.pool.backing_pool().is_some())
        .filter_map(|q| q.cheapest().map(|v| (*q, *v)))
        .collect();
    consumers.sort_by_key(|(_, v)| v.cost);
    for (quest, cheapest) in consumers {
        let affordable = plan.residual.completions_affordable(quest.pool, cheapest.cost);
        fill_type(plan, quest, cheapest, affordable);
    }

    plan.entries = merge_entries(std::mem::take(&mut plan.entries), catalog);
    plan.recompute_totals();

    for quest in order {
        if plan.entries_for(&quest.id).next().is_none() {
            let reason = skip_reason(plan, quest);
            log::trace!("{}: skipped ({:?})", quest.id, reason);
            plan.trace
                .record(Some(&quest.id), PlanEventType::Skipped { reason });
        }
    }
}

/// Take up to `affordable` completions of `variant`, within the room left
/// under the target.
fn fill_type(plan: &mut AllocationPlan, quest: &QuestType, variant: QuestVariant, affordable: u64) {
    let count = affordable.min(room(plan));
    if count > 0 {
        commit(plan, quest, variant, count);
    }
}

/// A category pool left with a partial completion only needs the difference
/// from the general pool. Smallest differences are covered first.
fn top_up_from_backing(plan: &mut AllocationPlan, order: &[&QuestType]) {
    let mut shortfalls: Vec<(u64, &QuestType, QuestVariant)> = order
        .iter()
        .filter(|q| q.pool.backing_pool().is_some())
        .filter_map(|q| {
            let cheapest = *q.cheapest()?;
            let dedicated = plan.residual.get(q.pool);
            (dedicated > 0 && dedicated < cheapest.cost)
                .then(|| (cheapest.cost - dedicated, *q, cheapest))
        })
        .collect();
    shortfalls.sort_by_key(|(need, ..)| *need);

    for (need, quest, cheapest) in shortfalls {
        let backing = quest.pool.backing_pool().map_or(0, |b| plan.residual.get(b));
        if room(plan) == 0 || backing < need {
            break;
        }
        commit(plan, quest, cheapest, 1);
    }
}

fn commit(plan: &mut AllocationPlan, quest: &QuestType, variant: QuestVariant, count: u64) {
    // callers size count from what is available, so the product fits
    let Some(draw) = plan.residual.draw(quest.pool, variant.cost * count) else {
        return;
    };
    credit(&mut plan.drawn, &draw);
    log::debug!(
        "{}: filled {} x {}/{} ({} from backing)",
        quest.id,
        count,
        variant.cost,
        variant.points,
        draw.from_backing
    );

    plan.trace.record(
        Some(&quest.id),
        PlanEventType::Filled {
            variant,
            count,
            draw,
        },
    );
    plan.entries.push(PlanEntry {
        quest_type: quest.id.clone(),
        pool: quest.pool,
        variant,
        count,
    });
    plan.total_quests = plan.total_quests.saturating_add(count);
}

fn skip_reason(plan: &AllocationPlan, quest: &QuestType) -> SkipReason {
    match quest.cheapest() {
        None => SkipReason::NoVariants,
        Some(_) if room(plan) == 0 => SkipReason::TargetReached,
        Some(cheapest) => SkipReason::Unaffordable {
            available: plan.residual.available_for(quest.pool),
            cheapest_cost: cheapest.cost,
        },
    }
}

fn upgrade(plan: &mut AllocationPlan, catalog: &QuestCatalog) {
    // Every pass moves each entry at most one step up its type's variant
    // list, and an entry that cannot move now never can later, so passes are
    // bounded by the longest variant list.
    let max_passes = catalog.iter().map(|q| q.variants.len()).max().unwrap_or(0);

    for pass in 1..=max_passes {
        let mut order: Vec<usize> = (0..plan.entries.len()).collect();
        order.sort_by_key(|&i| {
            let e = &plan.entries[i];
            (
                e.variant.points,
                e.variant.cost,
                catalog.position(&e.quest_type).unwrap_or(usize::MAX),
            )
        });

        let mut next = Vec::with_capacity(plan.entries.len());
        let mut upgrades = 0u64;
        for i in order {
            let entry = plan.entries[i].clone();
            let Some(quest) = catalog.get(&entry.quest_type) else {
                next.push(entry);
                continue;
            };
            upgrades += upgrade_entry(plan, quest, entry, &mut next);
        }

        plan.entries = merge_entries(next, catalog);
        plan.trace
            .record(None, PlanEventType::PassCompleted { pass, upgrades });
        if upgrades == 0 {
            break;
        }
    }

    plan.recompute_totals();
}

/// Try to move `entry` one step up. Pushes the resulting entries (upgraded
/// part and any part that could not be paid for) onto `out` and returns the
/// number of completions upgraded.
fn upgrade_entry(
    plan: &mut AllocationPlan,
    quest: &QuestType,
    entry: PlanEntry,
    out: &mut Vec<PlanEntry>,
) -> u64 {
    let candidates = quest.upgrades_from(&entry.variant);
    let Some(first) = candidates.first().copied() else {
        out.push(entry);
        return 0;
    };

    for to in candidates {
        let marginal = to.cost - entry.variant.cost;
        let available = plan.residual.available_for(entry.pool);
        let count = if marginal == 0 {
            entry.count
        } else {
            (available / marginal).min(entry.count)
        };
        if count == 0 {
            continue;
        }

        let Some(draw) = plan.residual.draw(entry.pool, marginal * count) else {
            continue;
        };
        credit(&mut plan.drawn, &draw);
        log::debug!(
            "{}: upgraded {} x {}/{} -> {}/{}",
            entry.quest_type,
            count,
            entry.variant.cost,
            entry.variant.points,
            to.cost,
            to.points
        );
        plan.trace.record(
            Some(&entry.quest_type),
            PlanEventType::Upgraded {
                from: entry.variant,
                to: *to,
                count,
                draw,
            },
        );

        if count < entry.count {
            out.push(PlanEntry {
                count: entry.count - count,
                ..entry.clone()
            });
        }
        out.push(PlanEntry {
            variant: *to,
            count,
            ..entry
        });
        return count;
    }

    plan.trace.record(
        Some(&entry.quest_type),
        PlanEventType::UpgradeRejected {
            from: entry.variant,
            to: *first,
            marginal_cost: first.cost - entry.variant.cost,
            available: plan.residual.available_for(entry.pool),
        },
    );
    out.push(entry);
    0
}

/// Combine entries for the same variant and order them by processing group,
/// then catalog position, then points.
fn merge_entries(entries: Vec<PlanEntry>, catalog: &QuestCatalog) -> Vec<PlanEntry> {
    let mut merged: Vec<PlanEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged
            .iter_mut()
            .find(|m| m.quest_type == entry.quest_type && m.variant == entry.variant)
        {
            Some(existing) => existing.count += entry.count,
            None => merged.push(entry),
        }
    }

    let order: Vec<&QuestTypeId> = catalog.processing_order().iter().map(|q| &q.id).collect();
    merged.sort_by_key(|e| {
        (
            order.iter().position(|id| **id == e.quest_type).unwrap_or(usize::MAX),
            e.variant.points,
            e.variant.cost,
        )
    });
    merged
}

//! Cost of the quest slots needed to attempt a target, and a pace advisor
//! that turns a plan's completion count into a daily slot-buying tier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlannerError;

// === PACE THRESHOLDS ===

const FREE_ONLY_MAX_PACE: Decimal = dec!(1.5);
const CHEAP_SLOTS_MAX_PACE: Decimal = dec!(4.5);
const MID_SLOTS_MAX_PACE: Decimal = dec!(7.5);

const CHEAP_SLOTS_DAILY_COST: Decimal = dec!(150);
const MID_SLOTS_DAILY_COST: Decimal = dec!(750);
const MID_SLOTS_PER_DAY: Decimal = dec!(7);
const PREMIUM_SLOT_COST: Decimal = dec!(1000);

/// Price of the n-th slot bought within one day (1-indexed).
pub trait SlotPricing {
    fn price(&self, slot: u64) -> u64;

    /// Total price of slots `1..=slots` within one day, saturating.
    fn cumulative(&self, slots: u64) -> u64 {
        (1..=slots).fold(0u64, |acc, i| acc.saturating_add(self.price(i)))
    }
}

impl<F> SlotPricing for F
where
    F: Fn(u64) -> u64,
{
    fn price(&self, slot: u64) -> u64 {
        self(slot)
    }
}

/// A run of `slots` consecutive slots at one price. `slots: None` covers
/// every slot after the previous steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStep {
    #[serde(default)]
    pub slots: Option<u64>,
    pub price: u64,
}

/// Non-decreasing step function of slot price within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotPriceSchedule {
    pub steps: Vec<PriceStep>,
}

impl Default for SlotPriceSchedule {
    /// First slot free, three at 50, three at 200, 1000 after that.
    fn default() -> Self {
        Self {
            steps: vec![
                PriceStep { slots: Some(1), price: 0 },
                PriceStep { slots: Some(3), price: 50 },
                PriceStep { slots: Some(3), price: 200 },
                PriceStep { slots: None, price: 1000 },
            ],
        }
    }
}

impl SlotPriceSchedule {
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.steps.is_empty() {
            return Err(PlannerError::InvalidConfig(
                "slot price schedule has no steps".to_string(),
            ));
        }
        if self.steps.windows(2).any(|w| w[0].price > w[1].price) {
            return Err(PlannerError::InvalidConfig(
                "slot prices must not decrease".to_string(),
            ));
        }
        if let Some(pos) = self.steps.iter().position(|s| s.slots.is_none()) {
            if pos + 1 != self.steps.len() {
                return Err(PlannerError::InvalidConfig(
                    "only the last price step may be open-ended".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl SlotPricing for SlotPriceSchedule {
    fn price(&self, slot: u64) -> u64 {
        let mut covered = 0u64;
        for step in &self.steps {
            match step.slots {
                Some(n) => {
                    covered = covered.saturating_add(n);
                    if slot <= covered {
                        return step.price;
                    }
                }
                None => return step.price,
            }
        }
        // Past a fully bounded schedule the last price holds.
        self.steps.last().map_or(0, |s| s.price)
    }

    /// One multiplication per step, so the cost does not grow with `slots`.
    fn cumulative(&self, slots: u64) -> u64 {
        let mut remaining = slots;
        let mut total = 0u64;
        for step in &self.steps {
            if remaining == 0 {
                return total;
            }
            let take = step.slots.map_or(remaining, |n| n.min(remaining));
            total = total.saturating_add(take.saturating_mul(step.price));
            remaining -= take;
        }
        let last = self.steps.last().map_or(0, |s| s.price);
        total.saturating_add(remaining.saturating_mul(last))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCost {
    pub day: u64,
    pub slots: u64,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostProjection {
    pub target: u64,
    pub needed: u64,
    pub per_day: Vec<DayCost>,
    pub total_cost: u64,
    /// Slots that could not be placed because the event has no days.
    pub unscheduled: u64,
}

/// Cost of buying enough extra slots over `event_days` to reach `target`
/// completions, given `free_quests` that cost nothing. Purchases are spread
/// evenly; the first `needed % days` days buy one extra slot.
pub fn project_cost(
    target: u64,
    free_quests: u64,
    event_days: u64,
    pricing: &impl SlotPricing,
) -> CostProjection {
    let needed = target.saturating_sub(free_quests);
    if event_days == 0 {
        if needed > 0 {
            log::warn!("no event days to schedule {} slots", needed);
        }
        return CostProjection {
            target,
            needed,
            per_day: Vec::new(),
            total_cost: 0,
            unscheduled: needed,
        };
    }

    let base = needed / event_days;
    let remainder = needed % event_days;
    let base_cost = pricing.cumulative(base);
    let extra_cost = if remainder > 0 {
        pricing.cumulative(base + 1)
    } else {
        base_cost
    };

    let per_day: Vec<DayCost> = (1..=event_days)
        .map(|day| {
            if day <= remainder {
                DayCost {
                    day,
                    slots: base + 1,
                    cost: extra_cost,
                }
            } else {
                DayCost {
                    day,
                    slots: base,
                    cost: base_cost,
                }
            }
        })
        .collect();
    let total_cost = per_day
        .iter()
        .fold(0u64, |acc, d| acc.saturating_add(d.cost));

    log::debug!(
        "target {}: {} slots over {} days cost {}",
        target,
        needed,
        event_days,
        total_cost
    );
    CostProjection {
        target,
        needed,
        per_day,
        total_cost,
        unscheduled: 0,
    }
}

impl fmt::Display for CostProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Slots to buy for target {}: {} (total {} diamonds)",
            self.target, self.needed, self.total_cost
        )?;
        for d in &self.per_day {
            writeln!(f, "  Day {}: {} slots, {} diamonds", d.day, d.slots, d.cost)?;
        }
        if self.unscheduled > 0 {
            writeln!(f, "  {} slots could not be scheduled", self.unscheduled)?;
        }
        Ok(())
    }
}

// === PACE ADVISOR ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceTier {
    /// Only the free daily quests.
    FreeOnly,
    /// Buy the 50-diamond slots, four quests a day.
    CheapSlots,
    /// Buy through the 200-diamond slots, seven quests a day.
    MidSlots,
    /// Needs 1000-diamond slots as well.
    PremiumSlots,
}

impl PaceTier {
    pub fn describe(&self) -> &'static str {
        match self {
            PaceTier::FreeOnly => "free slots only",
            PaceTier::CheapSlots => "up to the 50-diamond slots (4 per day)",
            PaceTier::MidSlots => "up to the 200-diamond slots (7 per day)",
            PaceTier::PremiumSlots => "1000-diamond slots as well (8+ per day)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceAdvice {
    pub quests_per_day: Decimal,
    pub tier: PaceTier,
    pub daily_diamonds: Decimal,
}

/// Pick a slot-buying tier for finishing `total_quests` over `event_days`.
pub fn recommend_pace(total_quests: u64, event_days: u64) -> PaceAdvice {
    if event_days == 0 {
        return PaceAdvice {
            quests_per_day: Decimal::ZERO,
            tier: PaceTier::FreeOnly,
            daily_diamonds: Decimal::ZERO,
        };
    }

    let pace = Decimal::from(total_quests) / Decimal::from(event_days);
    let (tier, daily_diamonds) = if pace <= FREE_ONLY_MAX_PACE {
        (PaceTier::FreeOnly, Decimal::ZERO)
    } else if pace <= CHEAP_SLOTS_MAX_PACE {
        (PaceTier::CheapSlots, CHEAP_SLOTS_DAILY_COST)
    } else if pace <= MID_SLOTS_MAX_PACE {
        (PaceTier::MidSlots, MID_SLOTS_DAILY_COST)
    } else {
        (
            PaceTier::PremiumSlots,
            MID_SLOTS_DAILY_COST + (pace - MID_SLOTS_PER_DAY) * PREMIUM_SLOT_COST,
        )
    };

    PaceAdvice {
        quests_per_day: pace.round_dp(2),
        tier,
        daily_diamonds: daily_diamonds.round_dp(0),
    }
}

impl fmt::Display for PaceAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pace: {} quests/day, buy {} (~{} diamonds/day)",
            self.quests_per_day,
            self.tier.describe(),
            self.daily_diamonds
        )
    }
}

//! Shortfall advice: how far a plan falls short of its target and what the
//! unlimited or purchasable filler quests would add if used to close the gap.
//! Informational only; nothing here feeds back into allocation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::allocation::AllocationPlan;

/// A quest that is not paid from the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filler {
    pub id: String,
    pub label: String,
    pub points_per_completion: u64,
    /// Free to repeat (rallies, gathering) as opposed to bought.
    pub unbounded: bool,
}

impl Filler {
    pub fn new(id: &str, label: &str, points_per_completion: u64, unbounded: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            points_per_completion,
            unbounded,
        }
    }

    pub fn defaults() -> Vec<Filler> {
        vec![
            Filler::new("giant_beast", "Giant Beast Rally", 300, true),
            Filler::new("gathering", "Resource Gathering", 240, true),
            Filler::new("charge", "Pack Purchase", 1050, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerProposal {
    pub filler: Filler,
    /// Score added if this filler alone closed the whole gap.
    pub potential_points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    pub missing: u64,
    pub proposals: Vec<FillerProposal>,
}

impl GapReport {
    pub fn is_closed(&self) -> bool {
        self.missing == 0
    }
}

/// Gap advice using [`Filler::defaults`].
pub fn gap(plan: &AllocationPlan, target: u64) -> GapReport {
    gap_with(plan, target, &Filler::defaults())
}

pub fn gap_with(plan: &AllocationPlan, target: u64, fillers: &[Filler]) -> GapReport {
    let missing = target.saturating_sub(plan.total_quests);
    let proposals = if missing == 0 {
        Vec::new()
    } else {
        fillers
            .iter()
            .map(|filler| FillerProposal {
                filler: filler.clone(),
                potential_points: missing.saturating_mul(filler.points_per_completion),
            })
            .collect()
    };

    if missing > 0 {
        log::debug!("{} quests short of target {}", missing, target);
    }
    GapReport { missing, proposals }
}

impl fmt::Display for GapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            return writeln!(f, "Target reached, no filler needed");
        }
        writeln!(f, "Short by {} quests. To close the gap:", self.missing)?;
        for p in &self.proposals {
            writeln!(
                f,
                "  {:<20} {} x {} pts = +{} pts{}",
                p.filler.label,
                self.missing,
                p.filler.points_per_completion,
                p.potential_points,
                if p.filler.unbounded { "" } else { " (purchase)" }
            )?;
        }
        Ok(())
    }
}

//! Host-side glue: load state from a [`Store`], run the planning pipeline,
//! and keep only the newest result on display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::allocation::{AllocationPlan, allocate_with};
use crate::catalog::QuestCatalog;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::gap::{GapReport, gap_with};
use crate::input::parse_quantity;
use crate::inventory::Inventory;
use crate::projection::{CostProjection, PaceAdvice, project_cost, recommend_pace};
use crate::store::Store;
use crate::types::ResourcePool;

pub const TARGET_KEY: &str = "target";

pub fn inventory_key(pool: ResourcePool) -> String {
    format!("inventory.{}", pool.as_str())
}

/// Everything the host renders for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub target: u64,
    pub above_advisory_max: bool,
    pub plan: AllocationPlan,
    pub gap: GapReport,
    pub cost: CostProjection,
    pub pace: PaceAdvice,
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;
        if self.above_advisory_max {
            writeln!(f, "Note: target {} is above the usual maximum", self.target)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.gap)?;
        writeln!(f)?;
        write!(f, "{}", self.cost)?;
        write!(f, "{}", self.pace)
    }
}

pub struct Session<S: Store> {
    store: S,
    config: PlannerConfig,
    inventory: Inventory,
    target: u64,
}

impl<S: Store> Session<S> {
    /// Read inventory and target from `store`. Missing or malformed values
    /// become zero; a missing target falls back to the configured one.
    pub fn load(store: S, config: PlannerConfig) -> Self {
        let mut inventory = Inventory::new();
        for pool in ResourcePool::ALL {
            if let Some(raw) = store.get(&inventory_key(pool)) {
                inventory.set(pool, parse_quantity(&raw));
            }
        }
        let target = store
            .get(TARGET_KEY)
            .map_or(config.target, |raw| parse_quantity(&raw));

        Self {
            store,
            config,
            inventory,
            target,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Normalize and persist one inventory quantity. Returns the stored value.
    pub fn set_quantity(&mut self, pool: ResourcePool, raw: &str) -> u64 {
        let quantity = parse_quantity(raw);
        self.inventory.set(pool, quantity);
        self.store.set(&inventory_key(pool), &quantity.to_string());
        quantity
    }

    pub fn set_target(&mut self, raw: &str) -> u64 {
        self.target = parse_quantity(raw);
        self.store.set(TARGET_KEY, &self.target.to_string());
        if self.config.exceeds_advisory_max(self.target) {
            log::info!(
                "target {} is above the advisory maximum {}",
                self.target,
                self.config.advisory_max_target
            );
        }
        self.target
    }

    /// Plan against `target` for this session only, without persisting it.
    pub fn override_target(&mut self, target: u64) {
        self.target = target;
    }

    /// Set `target` or any inventory field by name.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<u64, PlannerError> {
        if key == TARGET_KEY {
            return Ok(self.set_target(raw));
        }
        let pool: ResourcePool = key.parse()?;
        Ok(self.set_quantity(pool, raw))
    }

    /// Run allocation, gap advice, cost projection and pace advice on the
    /// current snapshot.
    pub fn plan(&self, catalog: &QuestCatalog) -> PlanReport {
        let config = &self.config;
        let plan = allocate_with(&self.inventory, catalog, self.target, config.fill_mode);
        let gap = gap_with(&plan, self.target, &config.fillers);
        let cost = project_cost(
            self.target,
            config.free_quests,
            config.event_days,
            &config.slot_prices,
        );
        let pace = recommend_pace(plan.total_quests, config.event_days);

        PlanReport {
            generated_at: Utc::now(),
            target: self.target,
            above_advisory_max: config.exceeds_advisory_max(self.target),
            plan,
            gap,
            cost,
            pace,
        }
    }
}

/// Holds the report currently on display. Each planning call takes a
/// generation number up front; a result is only shown if no newer call has
/// published already.
#[derive(Debug, Default)]
pub struct PlanBoard {
    issued: u64,
    shown: u64,
    latest: Option<PlanReport>,
}

impl PlanBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_generation(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns false when `report` is older than what is already shown.
    pub fn publish(&mut self, generation: u64, report: PlanReport) -> bool {
        if generation <= self.shown {
            log::debug!(
                "dropping stale plan {} (showing {})",
                generation,
                self.shown
            );
            return false;
        }
        self.shown = generation;
        self.latest = Some(report);
        true
    }

    pub fn latest(&self) -> Option<&PlanReport> {
        self.latest.as_ref()
    }

    pub fn shown_generation(&self) -> u64 {
        self.shown
    }
}

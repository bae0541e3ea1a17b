pub mod allocation;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod feasibility;
pub mod gap;
pub mod host;
pub mod input;
pub mod inventory;
pub mod projection;
pub mod store;
pub mod trace;
pub mod types;

pub use allocation::{AllocationPlan, FillMode, PlanEntry, allocate, allocate_with};
pub use catalog::{QuestCatalog, QuestType, QuestVariant};
pub use gap::{GapReport, gap};
pub use inventory::Inventory;
pub use projection::{CostProjection, project_cost};
pub use types::{Rank, ResourcePool};

#[cfg(test)]
mod host_test;
#[cfg(test)]
mod input_test;
#[cfg(test)]
mod projection_test;

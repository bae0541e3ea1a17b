use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::allocation::FillMode;
use crate::catalog::is_yaml;
use crate::error::PlannerError;
use crate::gap::Filler;
use crate::projection::SlotPriceSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub event_days: u64,
    pub free_quests: u64,
    pub target: u64,
    pub target_presets: Vec<u64>,
    /// Informational ceiling shown next to the target; never enforced.
    pub advisory_max_target: u64,
    pub fill_mode: FillMode,
    pub slot_prices: SlotPriceSchedule,
    pub fillers: Vec<Filler>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            event_days: 6,
            free_quests: 9,
            target: 51,
            target_presets: vec![24, 36, 51],
            advisory_max_target: 63,
            fill_mode: FillMode::Capped,
            slot_prices: SlotPriceSchedule::default(),
            fillers: Filler::defaults(),
        }
    }
}

impl PlannerConfig {
    /// Load from YAML (`.yaml`/`.yml`) or JSON. Missing fields take defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, PlannerError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
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

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.event_days == 0 {
            return Err(PlannerError::InvalidConfig(
                "event must last at least one day".to_string(),
            ));
        }
        self.slot_prices.validate()?;
        if self.fillers.iter().any(|f| f.id.is_empty()) {
            return Err(PlannerError::InvalidConfig(
                "filler ids must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn exceeds_advisory_max(&self, target: u64) -> bool {
        target > self.advisory_max_target
    }
}

impl fmt::Display for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event: {} days, {} free quests", self.event_days, self.free_quests)?;
        writeln!(
            f,
            "Target: {} (presets {:?}, advisory max {})",
            self.target, self.target_presets, self.advisory_max_target
        )?;
        writeln!(f, "Fill mode: {:?}", self.fill_mode)
    }
}

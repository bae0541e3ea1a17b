//! Key-value persistence for host state between sessions.
//!
//! The planner never reads the store itself; [`crate::host::Session`] loads
//! inventory and target from it and writes user edits back.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::PlannerError;
use crate::input::quantity_from_f64;

pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// A flat JSON object on disk. Writes stay in memory until [`flush`].
///
/// [`flush`]: JsonFileStore::flush
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileStore {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, PlannerError> {
        let values = match std::fs::read_to_string(path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => {
                let raw: BTreeMap<String, Value> = serde_json::from_str(&json)?;
                raw.into_iter()
                    .map(|(key, value)| {
                        let text = value_text(&key, value);
                        (key, text)
                    })
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("store {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> Result<(), PlannerError> {
        if !self.dirty {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        self.dirty = false;
        Ok(())
    }
}

/// Hand-edited files may hold bare numbers; they are read as quantities.
fn value_text(key: &str, value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n
            .as_u64()
            .unwrap_or_else(|| quantity_from_f64(n.as_f64().unwrap_or(0.0)))
            .to_string(),
        other => {
            log::debug!("store key {} holds {}, reading as 0", key, other);
            "0".to_string()
        }
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }
}

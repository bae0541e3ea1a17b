use std::error::Error;
use std::fmt;

/// Errors raised at the boundary: loading files, talking to the store,
/// validating host-supplied tables. The planning functions themselves are
/// total and never return these.
#[derive(Debug)]
pub enum PlannerError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    InvalidCatalog(String),
    InvalidConfig(String),
    UnknownPool(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Io(e) => write!(f, "I/O error: {}", e),
            PlannerError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
            PlannerError::Yaml(e) => write!(f, "Failed to parse YAML: {}", e),
            PlannerError::InvalidCatalog(msg) => write!(f, "Invalid catalog: {}", msg),
            PlannerError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            PlannerError::UnknownPool(name) => write!(f, "Unknown resource pool: {}", name),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlannerError::Io(e) => Some(e),
            PlannerError::Json(e) => Some(e),
            PlannerError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(e: std::io::Error) -> Self {
        PlannerError::Io(e)
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        PlannerError::Json(e)
    }
}

impl From<serde_yaml::Error> for PlannerError {
    fn from(e: serde_yaml::Error) -> Self {
        PlannerError::Yaml(e)
    }
}

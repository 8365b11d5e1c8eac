//! Static panel content
//!
//! The agenda, due-this-week list and system status snapshot have no API
//! behind them. They are read from an optional JSON file and default to empty.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading static content
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be read
    #[error("Failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid content JSON
    #[error("Failed to parse content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A calendar agenda entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    /// Display date, e.g. "Nov 5"
    pub date: String,
    pub title: String,
    /// Free-form category such as "election" or "deadline"
    #[serde(default)]
    pub kind: String,
}

/// A deadline shown in the due-this-week panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueItem {
    /// Display label, e.g. "Due Today"
    pub label: String,
    pub title: String,
}

/// Operational state of a monitored system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Operational,
    Degraded,
    Maintenance,
    Outage,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Operational => "operational",
            ServiceState::Degraded => "degraded",
            ServiceState::Maintenance => "maintenance",
            ServiceState::Outage => "outage",
        }
    }
}

/// One row of the system status snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub name: String,
    pub status: ServiceState,
}

/// Content for the panels that are not backed by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticContent {
    pub agenda: Vec<AgendaItem>,
    pub due_this_week: Vec<DueItem>,
    pub systems: Vec<SystemStatus>,
}

impl StaticContent {
    /// Reads static content from a JSON file
    ///
    /// Missing sections default to empty lists.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

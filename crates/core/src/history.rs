//! Connection history persistence.
//!
//! The history remembers every hostname and monitor configuration the user has
//! connected with so they can be offered again on the next run. Loading never
//! fails: a missing or broken file simply means there is no history yet.

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Previously used connection values, in the order they were first used.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConnectionHistory {
    #[serde(rename = "Hostnames")]
    pub hostnames: IndexSet<String>,
    #[serde(rename = "MonitorConfigs")]
    pub monitor_configs: IndexSet<String>,
}

impl ConnectionHistory {
    /// Records a hostname and a raw monitor configuration string.
    ///
    /// Values already present keep their original position.
    pub fn update(&mut self, hostname: &str, monitor_config: &str) {
        self.hostnames.insert(hostname.to_string());
        self.monitor_configs.insert(monitor_config.to_string());
    }
}

/// Result of reading the history file.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ConnectionHistory),
    Absent,
    Corrupt(Error),
}

impl LoadOutcome {
    /// Collapses the outcome into a history, falling back to an empty one.
    pub fn into_history(self) -> ConnectionHistory {
        match self {
            LoadOutcome::Loaded(history) => history,
            LoadOutcome::Absent | LoadOutcome::Corrupt(_) => ConnectionHistory::default(),
        }
    }
}

/// Formatting used when writing the history file.
///
/// Built once at startup and handed to [`save_history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    pub indented: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { indented: true }
    }
}

/// Reads the connection history from disk.
///
/// # Examples
///
/// ```
/// use rdp_launcher_core::history::{load_history, LoadOutcome};
///
/// let outcome = load_history("/this/path/does/not/exist.json".as_ref());
/// assert!(matches!(outcome, LoadOutcome::Absent));
/// assert!(outcome.into_history().hostnames.is_empty());
/// ```
pub fn load_history(path: &Path) -> LoadOutcome {
    if !path.exists() {
        return LoadOutcome::Absent;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            return LoadOutcome::Corrupt(Error::io_error(
                "history".to_string(),
                path.display().to_string(),
                e,
            ))
        }
    };

    match serde_json::from_str::<ConnectionHistory>(&contents) {
        Ok(history) => LoadOutcome::Loaded(history),
        Err(e) => LoadOutcome::Corrupt(Error::json_error(
            "reading".to_string(),
            "history".to_string(),
            path.display().to_string(),
            e,
        )),
    }
}

/// Writes the connection history to disk, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_history(path: &Path, history: &ConnectionHistory, format: JsonFormat) -> Result<()> {
    let serialized = if format.indented {
        serde_json::to_string_pretty(history)
    } else {
        serde_json::to_string(history)
    };

    let serialized = serialized.map_err(|e| {
        Error::json_error(
            "writing".to_string(),
            "history".to_string(),
            path.display().to_string(),
            e,
        )
    })?;

    fs::write(path, serialized)
        .map_err(|e| Error::io_error("history".to_string(), path.display().to_string(), e))
}

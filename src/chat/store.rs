//! Reading and writing the snapshot history as JSON on disk.
use std::fs;
use std::path::Path;

use anyhow::{Context, Error, Result};

use crate::ai::chat::models::SnapshotHistory;

/// Writes the whole history to `path`, replacing any previous file.
pub fn save_history(history: &SnapshotHistory, path: &Path) -> Result<(), Error> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(history)?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write chat history to {}", path.display()))?;
    Ok(())
}

pub fn try_load_history(path: &Path) -> Result<SnapshotHistory, Error> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat history at {}", path.display()))?;
    let history = serde_json::from_str(&data)
        .with_context(|| format!("Invalid chat history JSON at {}", path.display()))?;
    Ok(history)
}

/// Loads a history file. A missing or unreadable file is logged and
/// treated as an empty history.
pub fn load_history(path: &Path) -> SnapshotHistory {
    match try_load_history(path) {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("Error loading JSON data: {:?}", e);
            SnapshotHistory::new()
        }
    }
}

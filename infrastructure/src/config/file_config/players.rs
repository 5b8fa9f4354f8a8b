//! Roster pool from TOML (`[[players]]` array)
//!
//! ```toml
//! [[players]]
//! model = "gemma3:4b"
//! display_name = "gemma3"
//! color = "#FF6B6B"
//! ```

use impostor_domain::{RosterEntry, default_pool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePlayerEntry {
    pub model: String,
    /// Defaults to the model family (`qwen3:8b` -> `qwen3`)
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Colour for entries that do not set one
const DEFAULT_COLOR: &str = "#FFFFFF";

impl FilePlayerEntry {
    pub fn to_roster_entry(&self) -> RosterEntry {
        let model = self.model.trim();
        let display_name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| model.split(':').next().unwrap_or(model));
        let color = self.color.as_deref().unwrap_or(DEFAULT_COLOR);
        RosterEntry::new(model, display_name, color)
    }
}

impl From<RosterEntry> for FilePlayerEntry {
    fn from(entry: RosterEntry) -> Self {
        Self {
            model: entry.model.to_string(),
            display_name: Some(entry.display_name),
            color: Some(entry.color),
        }
    }
}

pub(super) fn default_players() -> Vec<FilePlayerEntry> {
    default_pool().into_iter().map(FilePlayerEntry::from).collect()
}

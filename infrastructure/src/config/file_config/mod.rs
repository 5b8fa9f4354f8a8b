//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types by the `to_*` methods.

mod game;
mod ollama;
mod pacing;
mod players;

pub use game::FileGameConfig;
pub use ollama::FileOllamaConfig;
pub use pacing::FilePacingConfig;
pub use players::FilePlayerEntry;

use super::issue::{ConfigIssue, ConfigIssueCode};
use impostor_application::ControllerParams;
use impostor_domain::RosterEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Inference server connection
    pub ollama: FileOllamaConfig,
    /// Table size, debate length, memory strategy
    pub game: FileGameConfig,
    /// Observer pauses
    pub pacing: FilePacingConfig,
    /// Roster pool; replaces the built-in pool when present
    pub players: Vec<FilePlayerEntry>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            ollama: FileOllamaConfig::default(),
            game: FileGameConfig::default(),
            pacing: FilePacingConfig::default(),
            players: players::default_players(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.ollama.validate());
        issues.extend(self.game.validate());
        issues.extend(self.pacing.validate());
        issues.extend(self.validate_players());

        issues
    }

    fn validate_players(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for (i, player) in self.players.iter().enumerate() {
            let model = player.model.trim();
            if model.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: format!("players[{i}].model"),
                    },
                    format!("players[{i}].model: must not be empty"),
                ));
            } else if !seen.insert(model.to_lowercase()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateModel {
                        model: model.to_string(),
                    },
                    format!("players: '{model}' is listed more than once"),
                ));
            }
        }

        if self.players.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::PoolTooSmall {
                    available: 0,
                    needed: self.game.player_count,
                },
                "players: the roster pool is empty",
            ));
        } else if seen.len() < self.game.player_count {
            // Still playable with --single-model or a human seat
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::PoolTooSmall {
                    available: seen.len(),
                    needed: self.game.player_count,
                },
                format!(
                    "players: {} models for {} seats; use --single-model or a smaller --count",
                    seen.len(),
                    self.game.player_count
                ),
            ));
        }

        issues
    }

    /// Roster pool, skipping blank and repeated entries
    pub fn roster(&self) -> Vec<RosterEntry> {
        let mut seen = HashSet::new();
        self.players
            .iter()
            .filter(|p| !p.model.trim().is_empty())
            .filter(|p| seen.insert(p.model.trim().to_lowercase()))
            .map(FilePlayerEntry::to_roster_entry)
            .collect()
    }

    pub fn controller_params(&self) -> ControllerParams {
        ControllerParams::default()
            .with_debate_rounds(self.game.debate_rounds.max(1))
            .with_context(self.game.parse_context().0)
            .with_pacing(self.pacing.to_pacing())
    }
}

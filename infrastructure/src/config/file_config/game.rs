//! Game configuration from TOML (`[game]` section)
//!
//! ```toml
//! [game]
//! player_count = 5
//! debate_rounds = 5
//! debate_duration_secs = 60
//! context = "persistent"   # or "replay"
//! human_name = "Human"
//! ```

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use impostor_application::ContextStrategy;
use impostor_domain::GameConfig;
use serde::{Deserialize, Serialize};

/// Most debate exchanges before a warning
const MAX_SENSIBLE_ROUNDS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    pub player_count: usize,
    /// Full debate exchanges per round
    pub debate_rounds: u32,
    pub debate_duration_secs: u64,
    /// "persistent" or "replay"
    pub context: String,
    pub human_name: String,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            player_count: game.player_count,
            debate_rounds: 5,
            debate_duration_secs: game.debate_duration_secs,
            context: ContextStrategy::default().as_str().to_string(),
            human_name: game.human_name,
        }
    }
}

impl FileGameConfig {
    /// Parse the context strategy, falling back to the default on unknown values
    pub fn parse_context(&self) -> (ContextStrategy, Vec<ConfigIssue>) {
        match self.context.parse() {
            Ok(strategy) => (strategy, Vec::new()),
            Err(_) => (
                ContextStrategy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "game.context".to_string(),
                        value: self.context.clone(),
                        valid_values: vec!["persistent".to_string(), "replay".to_string()],
                    },
                    format!(
                        "game.context: unknown value '{}', falling back to '{}'",
                        self.context,
                        ContextStrategy::default()
                    ),
                )],
            ),
        }
    }

    /// Base game setup; mode and seating are decided by the caller
    pub fn to_game_config(&self) -> GameConfig {
        GameConfig {
            human_name: self.human_name.trim().to_string(),
            player_count: self.player_count,
            debate_duration_secs: self.debate_duration_secs,
            ..GameConfig::default()
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !(3..=6).contains(&self.player_count) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "game.player_count".to_string(),
                },
                format!(
                    "game.player_count: {} is outside 3..=6",
                    self.player_count
                ),
            ));
        }
        if self.debate_rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "game.debate_rounds".to_string(),
                },
                "game.debate_rounds: must be at least 1",
            ));
        } else if self.debate_rounds > MAX_SENSIBLE_ROUNDS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "game.debate_rounds".to_string(),
                },
                format!(
                    "game.debate_rounds: {} exchanges per round will make games very long",
                    self.debate_rounds
                ),
            ));
        }
        if self.human_name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "game.human_name".to_string(),
                },
                "game.human_name: must not be empty",
            ));
        }
        issues.extend(self.parse_context().1);

        issues
    }
}

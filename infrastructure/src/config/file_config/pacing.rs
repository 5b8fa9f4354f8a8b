//! Observer pacing from TOML (`[pacing]` section), in milliseconds

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use impostor_application::Pacing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pauses longer than this are probably a unit mistake (seconds vs ms)
const MAX_SENSIBLE_PAUSE_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingConfig {
    pub reveal_ms: u64,
    pub turn_ms: u64,
    pub debate_ms: u64,
    pub vote_ms: u64,
    pub before_voting_ms: u64,
    pub tie_ms: u64,
    pub elimination_ms: u64,
}

impl Default for FilePacingConfig {
    fn default() -> Self {
        let pacing = Pacing::default();
        let ms = |d: Duration| d.as_millis() as u64;
        Self {
            reveal_ms: ms(pacing.reveal),
            turn_ms: ms(pacing.turn),
            debate_ms: ms(pacing.debate),
            vote_ms: ms(pacing.vote),
            before_voting_ms: ms(pacing.before_voting),
            tie_ms: ms(pacing.tie),
            elimination_ms: ms(pacing.elimination),
        }
    }
}

impl FilePacingConfig {
    pub fn to_pacing(&self) -> Pacing {
        Pacing {
            reveal: Duration::from_millis(self.reveal_ms),
            turn: Duration::from_millis(self.turn_ms),
            debate: Duration::from_millis(self.debate_ms),
            vote: Duration::from_millis(self.vote_ms),
            before_voting: Duration::from_millis(self.before_voting_ms),
            tie: Duration::from_millis(self.tie_ms),
            elimination: Duration::from_millis(self.elimination_ms),
        }
    }

    fn fields(&self) -> [(&'static str, u64); 7] {
        [
            ("reveal_ms", self.reveal_ms),
            ("turn_ms", self.turn_ms),
            ("debate_ms", self.debate_ms),
            ("vote_ms", self.vote_ms),
            ("before_voting_ms", self.before_voting_ms),
            ("tie_ms", self.tie_ms),
            ("elimination_ms", self.elimination_ms),
        ]
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| *value > MAX_SENSIBLE_PAUSE_MS)
            .map(|(name, value)| {
                ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: format!("pacing.{name}"),
                    },
                    format!("pacing.{name}: {value} ms is over a minute; values are milliseconds"),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_default_pacing() {
        assert_eq!(FilePacingConfig::default().to_pacing(), Pacing::default());
        assert_eq!(FilePacingConfig::default().reveal_ms, 3000);
    }

    #[test]
    fn test_long_pause_warns() {
        let config = FilePacingConfig {
            tie_ms: 120_000,
            ..FilePacingConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("pacing.tie_ms"));
    }
}

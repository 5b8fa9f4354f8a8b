//! Controller parameters — game loop control.
//!
//! [`ControllerParams`] groups the static parameters that control how a
//! [`GameController`](crate::use_cases::game_controller::GameController)
//! drives a game. These are application-layer concerns, not game rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How AI players remember the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextStrategy {
    /// Each player keeps a private chat transcript that grows with every event
    #[default]
    Persistent,
    /// Every request is rebuilt from the game record
    Replay,
}

impl ContextStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            ContextStrategy::Persistent => "persistent",
            ContextStrategy::Replay => "replay",
        }
    }
}

impl std::fmt::Display for ContextStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContextStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "persistent" | "chat" => Ok(ContextStrategy::Persistent),
            "replay" | "stateless" => Ok(ContextStrategy::Replay),
            other => Err(format!(
                "unknown context strategy '{other}' (expected 'persistent' or 'replay')"
            )),
        }
    }
}

/// Cosmetic pauses that keep the observer stream readable.
///
/// None of these affect correctness; [`Pacing::none`] is used in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// After dealing the word, before the first turn
    pub reveal: Duration,
    /// Between word-round turns
    pub turn: Duration,
    /// Between debate messages
    pub debate: Duration,
    /// Between AI ballots
    pub vote: Duration,
    /// Between the end of the debate and the first ballot
    pub before_voting: Duration,
    /// After announcing a tie, before the re-vote
    pub tie: Duration,
    /// After announcing an elimination
    pub elimination: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(3000),
            turn: Duration::from_millis(1000),
            debate: Duration::from_millis(1000),
            vote: Duration::from_millis(500),
            before_voting: Duration::from_millis(2000),
            tie: Duration::from_millis(2000),
            elimination: Duration::from_millis(3000),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            reveal: Duration::ZERO,
            turn: Duration::ZERO,
            debate: Duration::ZERO,
            vote: Duration::ZERO,
            before_voting: Duration::ZERO,
            tie: Duration::ZERO,
            elimination: Duration::ZERO,
        }
    }
}

/// Game loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerParams {
    /// Full debate exchanges per round; every AI speaks once per exchange
    pub debate_rounds: u32,
    /// Memory strategy for every AI player in the game
    pub context: ContextStrategy,
    pub pacing: Pacing,
    /// Seed for the controller's random fallbacks; random when unset
    pub seed: Option<u64>,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            debate_rounds: 5,
            context: ContextStrategy::default(),
            pacing: Pacing::default(),
            seed: None,
        }
    }
}

impl ControllerParams {
    // ==================== Builder Methods ====================

    pub fn with_debate_rounds(mut self, rounds: u32) -> Self {
        self.debate_rounds = rounds;
        self
    }

    pub fn with_context(mut self, context: ContextStrategy) -> Self {
        self.context = context;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ControllerParams::default();
        assert_eq!(params.debate_rounds, 5);
        assert_eq!(params.context, ContextStrategy::Persistent);
        assert_eq!(params.pacing.reveal, Duration::from_secs(3));
        assert!(params.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ControllerParams::default()
            .with_debate_rounds(2)
            .with_context(ContextStrategy::Replay)
            .with_pacing(Pacing::none())
            .with_seed(7);

        assert_eq!(params.debate_rounds, 2);
        assert_eq!(params.context, ContextStrategy::Replay);
        assert_eq!(params.pacing.turn, Duration::ZERO);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Replay".parse::<ContextStrategy>(), Ok(ContextStrategy::Replay));
        assert_eq!("persistent".parse::<ContextStrategy>(), Ok(ContextStrategy::Persistent));
        assert!("both".parse::<ContextStrategy>().is_err());
    }
}

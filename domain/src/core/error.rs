//! Domain error types

use thiserror::Error;

/// Errors raised while assembling a new game.
///
/// Once a game exists nothing in the domain fails: out-of-phase or invalid
/// actions are reported as no-ops by [`GameManager`](crate::game::GameManager).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameSetupError {
    #[error("A game needs between {min} and {max} players, got {requested}")]
    InvalidPlayerCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("Human position {position} is outside the table of {players} seats")]
    InvalidHumanPosition { position: usize, players: usize },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Word provider returned no secret word")]
    EmptyWordList,
}

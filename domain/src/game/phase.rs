//! Game phases and terminal results

use serde::{Deserialize, Serialize};

/// Phase of a game
///
/// ```text
/// SETUP → WORD_REVEAL → WORD_ROUND → DEBATE → VOTING → ELIMINATION
///                            ↑                   ↑          │
///                            │                   └── tie ───┤
///                            └──── innocent out ────────────┤
///                                                           ↓
///                                GAME_OVER ← IMPOSTOR_GUESS (impostor out)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    WordReveal,
    WordRound,
    Debate,
    Voting,
    Elimination,
    ImpostorGuess,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::WordReveal => "word_reveal",
            GamePhase::WordRound => "word_round",
            GamePhase::Debate => "debate",
            GamePhase::Voting => "voting",
            GamePhase::Elimination => "elimination",
            GamePhase::ImpostorGuess => "impostor_guess",
            GamePhase::GameOver => "game_over",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            GamePhase::Setup => "Setup",
            GamePhase::WordReveal => "Word Reveal",
            GamePhase::WordRound => "Word Round",
            GamePhase::Debate => "Debate",
            GamePhase::Voting => "Voting",
            GamePhase::Elimination => "Elimination",
            GamePhase::ImpostorGuess => "Impostor Guess",
            GamePhase::GameOver => "Game Over",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// The impostor was voted out and missed the secret word
    InnocentsWin,
    /// The impostor was voted out but named the secret word
    ImpostorWinsGuess,
    /// Too few innocents remain to outvote the impostor
    ImpostorWinsHidden,
}

impl GameResult {
    pub fn as_str(&self) -> &str {
        match self {
            GameResult::InnocentsWin => "innocents_win",
            GameResult::ImpostorWinsGuess => "impostor_wins_guess",
            GameResult::ImpostorWinsHidden => "impostor_wins_hidden",
        }
    }

    pub fn impostor_won(&self) -> bool {
        !matches!(self, GameResult::InnocentsWin)
    }

    pub fn description(&self) -> &str {
        match self {
            GameResult::InnocentsWin => "The innocents caught the impostor",
            GameResult::ImpostorWinsGuess => "The impostor guessed the secret word",
            GameResult::ImpostorWinsHidden => "The impostor stayed hidden",
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

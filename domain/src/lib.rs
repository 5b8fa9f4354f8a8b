//! Domain layer for impostor-word
//!
//! This crate contains the game model, the phase state machine and the
//! pure text handling around model replies. It has no dependencies on
//! infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Game
//!
//! Several players share a secret word, except the single impostor. Each
//! round they say one word, debate, and vote someone out:
//!
//! - **Innocents** win by eliminating the impostor, unless it then guesses the word
//! - **Impostor** wins by guessing the word, or by outlasting the innocents
//!
//! ## GameManager
//!
//! The [`GameManager`] owns the [`Game`] record and is the only writer of
//! phase, votes, eliminations and scores. Out-of-phase calls are no-ops.

pub mod core;
pub mod game;
pub mod prompt;
pub mod session;
pub mod text;

// Re-export commonly used types
pub use core::{error::GameSetupError, model::Model};
pub use game::{
    DebateMessage, Elimination, EliminationOutcome, Game, GameConfig, GameManager, GameMode,
    GamePhase, GameResult, Leaderboard, LeaderboardEntry, Player, RosterEntry, SecretWord,
    SharedLeaderboard, TallyEntry, Vote, Winner, assemble_game, default_pool,
};
pub use prompt::GamePrompts;
pub use session::entities::{Message, Role, Transcript};
pub use text::{ParsedVote, parse_vote_reply, redact_secret_word, word_from_reply, words_match};

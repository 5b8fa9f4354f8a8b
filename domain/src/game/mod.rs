//! Game domain
//!
//! - [`entities`] — `Game`, `Player`, `Vote`, `DebateMessage`
//! - [`phase`] — phases and terminal results
//! - [`manager::GameManager`] — the phase state machine, sole writer of a game
//! - [`scoring`] — point rules applied at the terminal transition
//! - [`leaderboard`] — lifetime totals shared across games
//! - [`roster`] — model pool and game assembly

pub mod entities;
pub mod leaderboard;
pub mod manager;
pub mod phase;
pub mod roster;
pub mod scoring;

pub use entities::{DebateMessage, Game, Player, Vote, Winner};
pub use leaderboard::{Leaderboard, LeaderboardEntry, SharedLeaderboard};
pub use manager::{Elimination, EliminationOutcome, GameManager, TallyEntry};
pub use phase::{GamePhase, GameResult};
pub use roster::{GameConfig, GameMode, RosterEntry, SecretWord, assemble_game, default_pool};

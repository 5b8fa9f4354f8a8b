//! Scoring engine
//!
//! Point deltas are computed here as plain data and applied by
//! [`GameManager`](super::manager::GameManager), which owns the game record
//! and the leaderboard handle.

use super::entities::Game;
use super::phase::GameResult;
use serde::Serialize;

/// Fixed point values
pub mod points {
    /// Innocent whose vote hit the impostor
    pub const VOTE_CORRECT: i32 = 10;
    /// Every innocent when the impostor is caught and misses the guess
    pub const IMPOSTOR_ELIMINATED: i32 = 5;
    /// Every innocent when the caught impostor names the word
    pub const IMPOSTOR_GUESSED: i32 = -5;
    /// Impostor that is never voted out
    pub const IMPOSTOR_NOT_FOUND: i32 = 15;
    /// Impostor that names the secret word after being caught
    pub const IMPOSTOR_GUESS_WORD: i32 = 20;
    /// Innocent voted out by the table, applied at elimination time
    pub const ELIMINATED_INNOCENT: i32 = -3;
}

/// Lifetime counters tracked per model on the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    GamePlayed,
    WinAsInnocent,
    WinAsImpostor,
    TimesImpostor,
    CorrectGuess,
    CorrectVote,
    VoteCast,
}

/// Points and counters owed to one player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Award {
    pub player_id: String,
    pub points: i32,
    pub stats: Vec<Stat>,
}

impl Award {
    fn new(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            ..Default::default()
        }
    }
}

/// Compute the terminal awards for `result`.
///
/// Votes are read from the final voting attempt, which is still on the
/// record when the impostor reaches the guess phase.
pub fn settle(game: &Game, result: GameResult) -> Vec<Award> {
    let impostor_id = game.impostor_id();
    let mut awards: Vec<Award> = game.players().iter().map(|p| Award::new(p.id())).collect();

    for (player, award) in game.players().iter().zip(awards.iter_mut()) {
        if !player.is_human() {
            award.stats.push(Stat::GamePlayed);
        }

        if player.is_impostor() {
            award.stats.push(Stat::TimesImpostor);
            match result {
                GameResult::InnocentsWin => {}
                GameResult::ImpostorWinsGuess => {
                    award.points += points::IMPOSTOR_GUESS_WORD;
                    award.stats.push(Stat::CorrectGuess);
                    award.stats.push(Stat::WinAsImpostor);
                }
                GameResult::ImpostorWinsHidden => {
                    award.points += points::IMPOSTOR_NOT_FOUND;
                    award.stats.push(Stat::WinAsImpostor);
                }
            }
            continue;
        }

        match result {
            GameResult::InnocentsWin => {
                award.points += points::IMPOSTOR_ELIMINATED;
                if game
                    .vote_of(player.id())
                    .is_some_and(|v| v.target_id == impostor_id)
                {
                    award.points += points::VOTE_CORRECT;
                    award.stats.push(Stat::CorrectVote);
                }
                award.stats.push(Stat::VoteCast);
                award.stats.push(Stat::WinAsInnocent);
            }
            GameResult::ImpostorWinsGuess => {
                award.points += points::IMPOSTOR_GUESSED;
            }
            GameResult::ImpostorWinsHidden => {}
        }
    }

    awards
}

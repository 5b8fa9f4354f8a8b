//! Phase state machine
//!
//! [`GameManager`] owns the canonical [`Game`] and is the only code that
//! mutates it. Every operation checks the current phase first and returns
//! a no-op result when called out of turn, so late or duplicated calls
//! (a human action racing the controller loop) leave the game untouched.

use super::entities::{DebateMessage, Game, Vote, Winner};
use super::leaderboard::{Leaderboard, LeaderboardEntry, SharedLeaderboard};
use super::phase::{GamePhase, GameResult};
use super::scoring::{self, points};
use crate::text::words_match;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::sync::MutexGuard;

/// Votes received by one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    pub target_id: String,
    pub votes: usize,
}

/// A completed elimination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    pub player_id: String,
    pub was_impostor: bool,
    pub tally: Vec<TallyEntry>,
    /// Phase the game moved to: word round, impostor guess or game over
    pub next_phase: GamePhase,
}

/// Result of resolving the current vote set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EliminationOutcome {
    /// Wrong phase or nothing to count
    Ignored,
    /// Two or more targets share the top count; nothing was mutated
    Tie { tied: Vec<String> },
    Eliminated(Elimination),
}

impl EliminationOutcome {
    pub fn is_tie(&self) -> bool {
        matches!(self, EliminationOutcome::Tie { .. })
    }

    pub fn eliminated(&self) -> Option<&Elimination> {
        match self {
            EliminationOutcome::Eliminated(elimination) => Some(elimination),
            _ => None,
        }
    }
}

/// Owner of one game's state and its scoring
pub struct GameManager {
    game: Game,
    leaderboard: SharedLeaderboard,
    rng: StdRng,
}

impl GameManager {
    pub fn new(game: Game, leaderboard: SharedLeaderboard) -> Self {
        Self::with_rng(game, leaderboard, StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic shuffles and tie-breaks
    pub fn with_seed(game: Game, leaderboard: SharedLeaderboard, seed: u64) -> Self {
        Self::with_rng(game, leaderboard, StdRng::seed_from_u64(seed))
    }

    fn with_rng(game: Game, leaderboard: SharedLeaderboard, rng: StdRng) -> Self {
        {
            let mut board = lock(&leaderboard);
            for player in game.players.iter().filter(|p| !p.is_human) {
                if let Some(model) = &player.model {
                    board.register(model, &player.display_name, &player.color);
                }
            }
        }
        Self {
            game,
            leaderboard,
            rng,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase
    }

    pub fn leaderboard_snapshot(&self) -> Vec<LeaderboardEntry> {
        lock(&self.leaderboard).snapshot()
    }

    // ==================== Transitions ====================

    /// `SETUP → WORD_REVEAL`
    pub fn start_game(&mut self) -> bool {
        if self.game.phase != GamePhase::Setup {
            return false;
        }
        self.game.phase = GamePhase::WordReveal;
        true
    }

    /// `WORD_REVEAL → WORD_ROUND` with a fresh speaking order
    pub fn advance_to_word_round(&mut self) -> bool {
        if self.game.phase != GamePhase::WordReveal {
            return false;
        }
        self.begin_word_round();
        true
    }

    /// Record the word of the player whose turn it is.
    ///
    /// Moves to `DEBATE` once every active player has spoken.
    pub fn record_word(&mut self, player_id: &str, word: &str) -> bool {
        if self.game.phase != GamePhase::WordRound {
            return false;
        }
        let is_current = self
            .game
            .current_player()
            .is_some_and(|p| p.id == player_id);
        if !is_current {
            return false;
        }

        if let Some(player) = self.game.player_mut(player_id) {
            player.words_said.push(word.to_string());
        }
        self.game.current_turn += 1;

        if self.game.current_turn >= self.game.active_count() {
            self.game.phase = GamePhase::Debate;
            self.game.current_turn = 0;
        }
        true
    }

    pub fn add_debate_message(&mut self, player_id: &str, message: &str) -> bool {
        if self.game.phase != GamePhase::Debate {
            return false;
        }
        if !self.game.player(player_id).is_some_and(|p| p.is_active()) {
            return false;
        }

        let sequence = self.game.next_message_seq;
        self.game.next_message_seq += 1;
        self.game.debate_messages.push(DebateMessage {
            player_id: player_id.to_string(),
            message: message.to_string(),
            sequence,
            timestamp: Utc::now(),
        });
        true
    }

    /// Enter `VOTING` from the debate or from a tied elimination
    pub fn start_voting(&mut self) -> bool {
        if !matches!(self.game.phase, GamePhase::Debate | GamePhase::Elimination) {
            return false;
        }
        self.game.votes.clear();
        self.game.phase = GamePhase::Voting;
        true
    }

    /// Record one ballot. Second ballots, self votes and votes involving
    /// eliminated players are ignored.
    pub fn record_vote(&mut self, voter_id: &str, target_id: &str, justification: &str) -> bool {
        if self.game.phase != GamePhase::Voting {
            return false;
        }
        if voter_id == target_id || self.game.has_voted(voter_id) {
            return false;
        }
        let both_active = [voter_id, target_id]
            .iter()
            .all(|id| self.game.player(id).is_some_and(|p| p.is_active()));
        if !both_active {
            return false;
        }

        self.game.votes.push(Vote {
            voter_id: voter_id.to_string(),
            target_id: target_id.to_string(),
            justification: justification.to_string(),
        });

        if self.game.votes.len() >= self.game.active_count() {
            self.game.phase = GamePhase::Elimination;
        }
        true
    }

    /// Count the ballots by target, in order of first vote received
    pub fn tally(&self) -> Vec<TallyEntry> {
        let mut tally: Vec<TallyEntry> = Vec::new();
        for vote in &self.game.votes {
            match tally.iter_mut().find(|t| t.target_id == vote.target_id) {
                Some(entry) => entry.votes += 1,
                None => tally.push(TallyEntry {
                    target_id: vote.target_id.clone(),
                    votes: 1,
                }),
            }
        }
        tally
    }

    fn leaders(tally: &[TallyEntry]) -> Vec<String> {
        let max = tally.iter().map(|t| t.votes).max().unwrap_or(0);
        tally
            .iter()
            .filter(|t| t.votes == max)
            .map(|t| t.target_id.clone())
            .collect()
    }

    /// Eliminate the unique most-voted player, or report a tie.
    pub fn process_elimination(&mut self) -> EliminationOutcome {
        if self.game.phase != GamePhase::Elimination || self.game.votes.is_empty() {
            return EliminationOutcome::Ignored;
        }

        let tally = self.tally();
        let mut leaders = Self::leaders(&tally);
        if leaders.len() > 1 {
            return EliminationOutcome::Tie { tied: leaders };
        }
        match leaders.pop() {
            Some(target) => self.eliminate(target, tally),
            None => EliminationOutcome::Ignored,
        }
    }

    /// Eliminate one of the tied leaders, chosen uniformly at random.
    pub fn break_tie_randomly(&mut self) -> EliminationOutcome {
        if self.game.phase != GamePhase::Elimination || self.game.votes.is_empty() {
            return EliminationOutcome::Ignored;
        }

        let tally = self.tally();
        let leaders = Self::leaders(&tally);
        match leaders.choose(&mut self.rng).cloned() {
            Some(target) => self.eliminate(target, tally),
            None => EliminationOutcome::Ignored,
        }
    }

    fn eliminate(&mut self, target_id: String, tally: Vec<TallyEntry>) -> EliminationOutcome {
        let Some(player) = self.game.player_mut(&target_id) else {
            return EliminationOutcome::Ignored;
        };
        player.is_eliminated = true;
        let was_impostor = player.is_impostor;
        self.game.eliminated.push(target_id.clone());

        if was_impostor {
            self.game.phase = GamePhase::ImpostorGuess;
        } else {
            self.award(&target_id, points::ELIMINATED_INNOCENT);

            if self.game.active_innocent_count() < 2 {
                self.end_game(GameResult::ImpostorWinsHidden);
            } else {
                self.game.round += 1;
                self.game.debate_messages.clear();
                self.game.votes.clear();
                self.begin_word_round();
            }
        }

        EliminationOutcome::Eliminated(Elimination {
            player_id: target_id,
            was_impostor,
            tally,
            next_phase: self.game.phase,
        })
    }

    /// Settle the game on the impostor's guess. Returns the result, or
    /// `None` when no guess is expected.
    pub fn process_impostor_guess(&mut self, guess: &str) -> Option<GameResult> {
        if self.game.phase != GamePhase::ImpostorGuess {
            return None;
        }
        self.game.impostor_guess = Some(guess.trim().to_string());

        let result = if words_match(guess, &self.game.secret_word) {
            GameResult::ImpostorWinsGuess
        } else {
            GameResult::InnocentsWin
        };
        self.end_game(result);
        Some(result)
    }

    // ==================== Internals ====================

    /// Shuffle active players, keep eliminated ones in order at the back,
    /// and open the word round at the first seat.
    fn begin_word_round(&mut self) {
        let (mut active, eliminated): (Vec<_>, Vec<_>) = std::mem::take(&mut self.game.players)
            .into_iter()
            .partition(|p| p.is_active());
        active.shuffle(&mut self.rng);
        active.extend(eliminated);
        self.game.players = active;
        self.game.current_turn = 0;
        self.game.phase = GamePhase::WordRound;
    }

    fn award(&mut self, player_id: &str, delta: i32) {
        let Some(player) = self.game.player_mut(player_id) else {
            return;
        };
        player.score += delta;
        if !player.is_human
            && let Some(model) = &player.model
        {
            lock(&self.leaderboard).add_points(model, delta);
        }
    }

    /// Terminal transition: scores, result and winner change together.
    fn end_game(&mut self, result: GameResult) {
        let awards = scoring::settle(&self.game, result);
        {
            let mut board = lock(&self.leaderboard);
            for award in awards {
                let Some(player) = self.game.player_mut(&award.player_id) else {
                    continue;
                };
                player.score += award.points;
                if player.is_human {
                    continue;
                }
                if let Some(model) = &player.model {
                    board.add_points(model, award.points);
                    for stat in award.stats {
                        board.record(model, stat);
                    }
                }
            }
        }

        self.game.result = Some(result);
        self.game.winner = Some(if result.impostor_won() {
            Winner::Impostor
        } else {
            Winner::Innocents
        });
        self.game.phase = GamePhase::GameOver;
    }

    /// Random index helper for callers that share this game's rng
    pub fn random_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}

fn lock(leaderboard: &SharedLeaderboard) -> MutexGuard<'_, Leaderboard> {
    leaderboard
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

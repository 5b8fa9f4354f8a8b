//! Lifetime leaderboard keyed by model
//!
//! The leaderboard outlives individual games and is shared between them,
//! so it travels as a [`SharedLeaderboard`]. Every mutation is a short
//! lock-update-unlock with no suspension in between.

use super::roster::RosterEntry;
use super::scoring::Stat;
use crate::core::model::Model;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Leaderboard handle shared by every game in the process
pub type SharedLeaderboard = Arc<Mutex<Leaderboard>>;

/// Aggregate results for one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub model: Model,
    pub display_name: String,
    pub color: String,
    pub score: i64,
    pub games_played: u32,
    pub wins_as_innocent: u32,
    pub wins_as_impostor: u32,
    pub times_impostor: u32,
    pub correct_guesses: u32,
    pub correct_votes: u32,
    pub total_votes: u32,
    /// Share of votes that hit the impostor, as a percentage
    pub vote_accuracy: f64,
}

impl LeaderboardEntry {
    fn new(model: Model, display_name: String, color: String) -> Self {
        Self {
            model,
            display_name,
            color,
            score: 0,
            games_played: 0,
            wins_as_innocent: 0,
            wins_as_impostor: 0,
            times_impostor: 0,
            correct_guesses: 0,
            correct_votes: 0,
            total_votes: 0,
            vote_accuracy: 0.0,
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins_as_innocent + self.wins_as_impostor
    }

    fn bump(&mut self, stat: Stat) {
        match stat {
            Stat::GamePlayed => self.games_played += 1,
            Stat::WinAsInnocent => self.wins_as_innocent += 1,
            Stat::WinAsImpostor => self.wins_as_impostor += 1,
            Stat::TimesImpostor => self.times_impostor += 1,
            Stat::CorrectGuess => self.correct_guesses += 1,
            Stat::CorrectVote => self.correct_votes += 1,
            Stat::VoteCast => self.total_votes += 1,
        }
        self.vote_accuracy = if self.total_votes == 0 {
            0.0
        } else {
            let pct = f64::from(self.correct_votes) / f64::from(self.total_votes) * 100.0;
            (pct * 10.0).round() / 10.0
        };
    }
}

/// Running totals across games (Aggregate)
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: HashMap<Model, LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register every model in the roster pool so it shows up with its
    /// pool name and colour before its first game.
    pub fn with_roster(pool: &[RosterEntry]) -> Self {
        let mut board = Self::new();
        for entry in pool {
            board.register(&entry.model, &entry.display_name, &entry.color);
        }
        board
    }

    pub fn shared(self) -> SharedLeaderboard {
        Arc::new(Mutex::new(self))
    }

    /// Make sure `model` has an entry. Existing entries keep their name.
    pub fn register(&mut self, model: &Model, display_name: &str, color: &str) {
        self.entries.entry(model.clone()).or_insert_with(|| {
            LeaderboardEntry::new(model.clone(), display_name.to_string(), color.to_string())
        });
    }

    pub fn add_points(&mut self, model: &Model, points: i32) {
        if let Some(entry) = self.entries.get_mut(model) {
            entry.score += i64::from(points);
        }
    }

    pub fn record(&mut self, model: &Model, stat: Stat) {
        if let Some(entry) = self.entries.get_mut(model) {
            entry.bump(stat);
        }
    }

    pub fn get(&self, model: &Model) -> Option<&LeaderboardEntry> {
        self.entries.get(model)
    }

    /// Entries ordered by score, highest first; ties broken by model tag
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<_> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.model.as_str().cmp(b.model.as_str()))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_sorted_by_score() {
        let mut board = Leaderboard::new();
        let a = Model::new("a:1b");
        let b = Model::new("b:1b");
        board.register(&a, "A", "#111");
        board.register(&b, "B", "#222");
        board.add_points(&a, 5);
        board.add_points(&b, 20);

        let snapshot = board.snapshot();
        assert_eq!(snapshot[0].model, b);
        assert_eq!(snapshot[0].score, 20);
        assert_eq!(snapshot[1].score, 5);
    }

    #[test]
    fn test_vote_accuracy_rounds_to_one_decimal() {
        let mut board = Leaderboard::new();
        let m = Model::new("m");
        board.register(&m, "M", "#000");
        for _ in 0..3 {
            board.record(&m, Stat::VoteCast);
        }
        board.record(&m, Stat::CorrectVote);

        let entry = board.get(&m).unwrap();
        assert_eq!(entry.total_votes, 3);
        assert_eq!(entry.correct_votes, 1);
        assert_eq!(entry.vote_accuracy, 33.3);
    }

    #[test]
    fn test_unregistered_model_is_ignored() {
        let mut board = Leaderboard::new();
        board.add_points(&Model::new("ghost"), 10);
        board.record(&Model::new("ghost"), Stat::GamePlayed);
        assert!(board.is_empty());
    }

    #[test]
    fn test_register_keeps_first_name() {
        let mut board = Leaderboard::new();
        let m = Model::new("m");
        board.register(&m, "First", "#000");
        board.register(&m, "Second", "#FFF");
        assert_eq!(board.get(&m).unwrap().display_name, "First");
    }
}

//! Game event types and the broadcast port
//!
//! These events form the output port from the game controller to whoever
//! observes a game (console presenter, event log, a network transport).
//! They are emitted in exactly the order the game state changes.

use impostor_domain::{GamePhase, GameResult, LeaderboardEntry, Winner};
use serde::Serialize;

/// An event emitted by one game
#[derive(Debug, Clone, Serialize)]
pub struct GameEvent {
    pub game_id: String,
    #[serde(flatten)]
    pub kind: GameEventKind,
}

impl GameEvent {
    pub fn new(game_id: impl Into<String>, kind: GameEventKind) -> Self {
        Self {
            game_id: game_id.into(),
            kind,
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }
}

/// Ballots received by one player in a resolved vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub player_id: String,
    pub player_name: String,
    pub votes: usize,
}

/// Final score of one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub player_id: String,
    pub player_name: String,
    pub is_impostor: bool,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventKind {
    PhaseChange {
        phase: GamePhase,
        round: u32,
        /// Announced debate length, set when the debate opens
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_secs: Option<u64>,
    },
    /// The secret word has been dealt. Only the human's own word is shown.
    WordReveal {
        category: Option<String>,
        human_id: Option<String>,
        human_word: Option<String>,
    },
    PlayerTurn {
        player_id: String,
        player_name: String,
        is_human: bool,
    },
    AiThinking {
        player_id: String,
        thinking: bool,
    },
    PlayerWord {
        player_id: String,
        player_name: String,
        word: String,
    },
    DebateRound {
        round: u32,
        total: u32,
    },
    NewDebateMessage {
        player_id: String,
        player_name: String,
        message: String,
    },
    DebateEnded,
    PlayerVoted {
        voter_id: String,
        voter_name: String,
        target_id: String,
        target_name: String,
        justification: String,
    },
    VoteTie {
        tied: Vec<String>,
        attempt: u32,
    },
    Elimination {
        player_id: String,
        player_name: String,
        was_impostor: bool,
        votes: Vec<VoteCount>,
    },
    ImpostorGuess {
        player_id: String,
        guess: String,
        correct: bool,
        secret_word: String,
    },
    GameOver {
        result: GameResult,
        winner: Winner,
        secret_word: String,
        impostor_id: String,
        impostor_name: String,
        impostor_guess: Option<String>,
        scores: Vec<FinalScore>,
        leaderboard: Vec<LeaderboardEntry>,
    },
}

impl GameEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEventKind::PhaseChange { .. } => "phase_change",
            GameEventKind::WordReveal { .. } => "word_reveal",
            GameEventKind::PlayerTurn { .. } => "player_turn",
            GameEventKind::AiThinking { .. } => "ai_thinking",
            GameEventKind::PlayerWord { .. } => "player_word",
            GameEventKind::DebateRound { .. } => "debate_round",
            GameEventKind::NewDebateMessage { .. } => "new_debate_message",
            GameEventKind::DebateEnded => "debate_ended",
            GameEventKind::PlayerVoted { .. } => "player_voted",
            GameEventKind::VoteTie { .. } => "vote_tie",
            GameEventKind::Elimination { .. } => "elimination",
            GameEventKind::ImpostorGuess { .. } => "impostor_guess",
            GameEventKind::GameOver { .. } => "game_over",
        }
    }
}

/// Port for delivering game events to observers.
///
/// `publish` is synchronous and non-fallible: delivery is best effort and
/// the controller never waits on an observer.
pub trait Broadcaster: Send + Sync {
    fn publish(&self, event: GameEvent);
}

/// No-op broadcaster for tests and headless runs.
pub struct NoBroadcast;

impl Broadcaster for NoBroadcast {
    fn publish(&self, _event: GameEvent) {}
}

/// Fans every event out to several broadcasters, in order.
#[derive(Default)]
pub struct CompositeBroadcaster {
    targets: Vec<std::sync::Arc<dyn Broadcaster>>,
}

impl CompositeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: std::sync::Arc<dyn Broadcaster>) -> Self {
        self.targets.push(target);
        self
    }
}

impl Broadcaster for CompositeBroadcaster {
    fn publish(&self, event: GameEvent) {
        if let Some((last, rest)) = self.targets.split_last() {
            for target in rest {
                target.publish(event.clone());
            }
            last.publish(event);
        }
    }
}

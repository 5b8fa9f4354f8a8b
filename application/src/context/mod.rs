//! Conversation context for AI players
//!
//! A game uses exactly one [`ConversationContext`] for all of its AI
//! players, chosen by [`ContextStrategy`]:
//!
//! | Strategy | State | Request sent |
//! |----------|-------|--------------|
//! | [`PersistentContext`] | One transcript per player, appended on every event | Whole transcript via `chat` |
//! | [`ReplayContext`] | None beyond the call memory | Prompt rebuilt from the game record |
//!
//! Both return the model's raw reply; cleaning and fallbacks are applied by
//! the controller so the two strategies behave the same downstream.

mod persistent;
mod replay;

pub use persistent::PersistentContext;
pub use replay::ReplayContext;

use crate::config::ContextStrategy;
use crate::ports::inference_client::{InferenceClient, InferenceError};
use async_trait::async_trait;
use impostor_domain::{Game, GameResult, Player};

/// Something that happened in the game that AI players should hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent<'a> {
    RoundStarted {
        round: u32,
    },
    Word {
        speaker_id: &'a str,
        word: &'a str,
    },
    DebateStarted,
    DebateMessage {
        speaker_id: &'a str,
        message: &'a str,
    },
    VotingStarted,
    Vote {
        voter_id: &'a str,
        target_id: &'a str,
        justification: &'a str,
    },
    VoteTied,
    Eliminated {
        player_id: &'a str,
        was_impostor: bool,
    },
    GameOver {
        result: GameResult,
    },
}

impl ContextEvent<'_> {
    /// Player who authored the event, if any. They never hear it back.
    pub fn speaker(&self) -> Option<&str> {
        match self {
            ContextEvent::Word { speaker_id, .. }
            | ContextEvent::DebateMessage { speaker_id, .. } => Some(speaker_id),
            ContextEvent::Vote { voter_id, .. } => Some(voter_id),
            _ => None,
        }
    }
}

/// What the controller needs from a player this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRequest {
    Word,
    Debate { exchange: u32 },
    Vote { candidates: Vec<String> },
    Guess,
}

impl TurnRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            TurnRequest::Word => "word",
            TurnRequest::Debate { .. } => "debate",
            TurnRequest::Vote { .. } => "vote",
            TurnRequest::Guess => "guess",
        }
    }
}

/// Memory strategy for AI players
#[async_trait]
pub trait ConversationContext: Send {
    fn strategy(&self) -> ContextStrategy;

    /// Called once when the game starts
    fn begin(&mut self, game: &Game);

    /// Called after the game state reflects `event`
    fn observe(&mut self, game: &Game, event: &ContextEvent<'_>);

    /// Ask `player` for a turn and return the raw reply
    async fn request(
        &mut self,
        inference: &dyn InferenceClient,
        game: &Game,
        player: &Player,
        turn: &TurnRequest,
    ) -> Result<String, InferenceError>;
}

/// Build the context for `strategy`
pub fn context_for(strategy: ContextStrategy) -> Box<dyn ConversationContext> {
    match strategy {
        ContextStrategy::Persistent => Box::new(PersistentContext::new()),
        ContextStrategy::Replay => Box::new(ReplayContext::new()),
    }
}

//! Inbound human actions
//!
//! Human input arrives out of band (console, network transport) and is
//! delivered to the game's controller over a channel. The controller
//! applies each action at its next suspension point; an action sent in
//! the wrong phase, or by a player it does not concern, is dropped.

use tokio::sync::mpsc;

/// Something the human player did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanAction {
    SubmitWord { player_id: String, word: String },
    SubmitDebateMessage { player_id: String, message: String },
    CastVote { player_id: String, target_id: String },
    SubmitGuess { player_id: String, guess: String },
}

impl HumanAction {
    pub fn player_id(&self) -> &str {
        match self {
            HumanAction::SubmitWord { player_id, .. }
            | HumanAction::SubmitDebateMessage { player_id, .. }
            | HumanAction::CastVote { player_id, .. }
            | HumanAction::SubmitGuess { player_id, .. } => player_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HumanAction::SubmitWord { .. } => "submit_word",
            HumanAction::SubmitDebateMessage { .. } => "submit_debate_message",
            HumanAction::CastVote { .. } => "cast_vote",
            HumanAction::SubmitGuess { .. } => "submit_guess",
        }
    }
}

/// Sending half handed to whoever collects human input
pub type HumanActionSender = mpsc::UnboundedSender<HumanAction>;

/// Receiving half owned by the controller
pub type HumanActionReceiver = mpsc::UnboundedReceiver<HumanAction>;

pub fn human_action_channel() -> (HumanActionSender, HumanActionReceiver) {
    mpsc::unbounded_channel()
}

//! Application layer for impostor-word
//!
//! This crate contains the game controller, game creation and the store
//! of running games, plus the ports the outer layers implement.
//! It depends only on the domain layer.

pub mod config;
pub mod context;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{ContextStrategy, ControllerParams, Pacing};
pub use context::{ConversationContext, PersistentContext, ReplayContext, context_for};
pub use ports::{
    broadcaster::{
        Broadcaster, CompositeBroadcaster, FinalScore, GameEvent, GameEventKind, NoBroadcast,
        VoteCount,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    human_action::{HumanAction, HumanActionReceiver, HumanActionSender, human_action_channel},
    inference_client::{InferenceClient, InferenceError},
    word_provider::{FixedWord, WordProvider},
};
pub use use_cases::create_game::{CreateGameUseCase, PreparedGame};
pub use use_cases::game_controller::{GameController, MAX_TIED_VOTES};
pub use use_cases::game_store::{GameHandle, GameStore};

//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording every exchange
//! with a model (the request sent on a player's behalf, the raw reply, and
//! recovered failures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs and from game
//! events: tracing handles human-readable diagnostics, game events describe
//! what observers see, and this port captures what each model was actually
//! asked and answered.

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "model_request", "model_reply", "model_error").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that a broken log
/// never interrupts a game; implementations swallow write failures.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

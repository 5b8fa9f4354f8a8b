//! Logging infrastructure — structured event logging.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements both
//! the [`Broadcaster`](impostor_application::Broadcaster) and
//! [`ConversationLogger`](impostor_application::ConversationLogger) ports.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;

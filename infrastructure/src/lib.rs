//! Infrastructure layer for impostor-word
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod events;
pub mod logging;
pub mod ollama;
pub mod words;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileGameConfig,
    FileOllamaConfig, FilePacingConfig, FilePlayerEntry, Severity,
};
pub use events::ChannelBroadcaster;
pub use logging::JsonlEventLogger;
pub use ollama::{OllamaClient, OllamaSettings};
pub use words::{Category, StaticWordList};

//! Presentation layer for impostor-word
//!
//! This crate contains the CLI definition, console rendering of game
//! events and the terminal input loop for a human player.

pub mod cli;
pub mod human;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, ContextArg, OutputFormat};
pub use human::{HumanConsole, InputRejected, stdin_lines};
pub use output::console::{ConsoleFormatter, format_leaderboard};
pub use output::formatter::EventFormatter;
pub use output::json::JsonFormatter;
pub use progress::presenter::ConsolePresenter;

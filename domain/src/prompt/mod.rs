//! Prompt domain
//!
//! Briefings, turn requests and event lines sent to AI players.

mod template;

pub use template::{GamePrompts, HISTORY_WINDOW, NO_THINK_DIRECTIVE};

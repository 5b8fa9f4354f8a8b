//! Terminal output for game events

pub mod console;
pub mod formatter;
pub mod json;

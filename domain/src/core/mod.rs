//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — a model tag served by the inference backend
//! - [`error::GameSetupError`] — errors raised while assembling a game

pub mod error;
pub mod model;

//! Conversation domain.
//!
//! - [`entities::Message`] — a single role-tagged message
//! - [`entities::Transcript`] — the append-only history kept for one AI player

pub mod entities;

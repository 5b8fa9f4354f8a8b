//! Transcript entities: role-tagged messages exchanged with a model

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An append-only chat transcript owned by one AI player (Entity)
///
/// Starts with the player's private briefing; game events arrive as
/// `user` entries and the player's own replies as `assistant` entries.
#[derive(Debug, Clone)]
pub struct Transcript {
    player_id: String,
    model: Model,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(player_id: impl Into<String>, model: Model, briefing: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            model,
            messages: vec![Message::system(briefing)],
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append an externally authored entry (game event or turn request)
    pub fn push_event(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append the player's own reply
    pub fn push_reply(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_starts_with_briefing() {
        let transcript = Transcript::new("player_0", Model::new("mistral:7b"), "You are Alfa.");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.player_id(), "player_0");
    }

    #[test]
    fn test_transcript_appends_in_order() {
        let mut transcript = Transcript::new("p", Model::new("m"), "brief");
        transcript.push_event("[WORD] Beta says: \"sand\"");
        transcript.push_reply("wave");

        let roles: Vec<Role> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(transcript.messages()[2].content, "wave");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}

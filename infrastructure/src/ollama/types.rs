//! Wire types for the Ollama HTTP API

use impostor_domain::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Options {
    pub temperature: f32,
    pub num_predict: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: Options,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for ChatMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    pub options: Options,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagEntry {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let messages = [Message::system("rules"), Message::user("your turn")];
        let request = ChatRequest {
            model: "gemma3:4b",
            messages: messages.iter().map(ChatMessage::from).collect(),
            stream: false,
            options: Options {
                temperature: 0.7,
                num_predict: 100,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gemma3:4b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "your turn");
        assert_eq!(json["options"]["num_predict"], 100);
    }

    #[test]
    fn test_chat_response_without_message() {
        let response: ChatResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(response.message.is_none());
    }

    #[test]
    fn test_tags_response() {
        let response: TagsResponse = serde_json::from_str(
            r#"{"models": [{"name": "gemma3:4b", "size": 1}, {"name": "qwen3:8b"}]}"#,
        )
        .unwrap();
        let names: Vec<&str> = response.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["gemma3:4b", "qwen3:8b"]);
    }
}

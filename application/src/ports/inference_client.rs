//! Inference client port
//!
//! Defines the interface for requesting text from a model server.

use async_trait::async_trait;
use impostor_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur while requesting a completion
///
/// Implementations retry internally; an error here means the bounded
/// retries were exhausted.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Client for a model inference server
///
/// This port defines how the application layer obtains model output.
/// Implementations (adapters) live in the infrastructure layer. Neither
/// call has side effects visible to the game beyond its return value.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Single-shot completion of `prompt`
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, InferenceError>;

    /// Completion of a role-tagged message history
    async fn chat(&self, model: &Model, messages: &[Message]) -> Result<String, InferenceError>;

    /// Models installed on the server
    async fn available_models(&self) -> Result<Vec<Model>, InferenceError> {
        Ok(Vec::new())
    }
}

//! HTTP client for an Ollama server
//!
//! Implements [`InferenceClient`] over `/api/generate` and `/api/chat`
//! with a per-request timeout and a bounded number of attempts. A missing
//! model is reported immediately; every other failure is retried after a
//! short delay until the attempts run out.

use super::types::{
    ChatMessage, ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, Options,
    TagsResponse,
};
use async_trait::async_trait;
use impostor_application::ports::inference_client::{InferenceClient, InferenceError};
use impostor_domain::{Message, Model};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for the availability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection and sampling settings
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub temperature: f32,
    /// Upper bound on generated tokens (`num_predict`)
    pub max_tokens: u32,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            timeout: Duration::from_secs(60),
            max_attempts: 2,
            retry_delay: Duration::from_millis(1000),
            temperature: 0.7,
            max_tokens: 100,
        }
    }
}

pub struct OllamaClient {
    http: reqwest::Client,
    settings: OllamaSettings,
}

impl OllamaClient {
    pub fn new(settings: OllamaSettings) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| InferenceError::Other(e.to_string()))?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &OllamaSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn options(&self) -> Options {
        Options {
            temperature: self.settings.temperature,
            num_predict: self.settings.max_tokens,
        }
    }

    /// Whether the server answers on `/api/tags`
    pub async fn is_available(&self) -> bool {
        match self
            .http
            .get(self.url("/api/tags"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Inference server probe failed: {}", e);
                false
            }
        }
    }

    /// Names of the models installed on the server
    pub async fn list_models(&self) -> Result<Vec<Model>, InferenceError> {
        let response = self
            .http
            .get(self.url("/api/tags"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| Model::new(m.name)).collect())
    }

    /// POST `body` to `path`, retrying until the attempts run out
    async fn post<B, R>(&self, path: &str, model: &Model, body: &B) -> Result<R, InferenceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.post_once(path, model, body).await {
                Ok(reply) => return Ok(reply),
                Err(e @ InferenceError::ModelNotAvailable(_)) => return Err(e),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    warn!(
                        model = %model,
                        attempt,
                        attempts,
                        "Request to {} failed, retrying: {}",
                        path,
                        e
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn post_once<B, R>(&self, path: &str, model: &Model, body: &B) -> Result<R, InferenceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND && body.contains("not found") {
                return Err(InferenceError::ModelNotAvailable(model.to_string()));
            }
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else if e.is_connect() {
        InferenceError::ConnectionError(e.to_string())
    } else {
        InferenceError::Other(e.to_string())
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: model.as_str(),
            prompt,
            stream: false,
            options: self.options(),
        };
        let response: GenerateResponse = self.post("/api/generate", model, &request).await?;
        Ok(response.response.trim().to_string())
    }

    async fn chat(&self, model: &Model, messages: &[Message]) -> Result<String, InferenceError> {
        let request = ChatRequest {
            model: model.as_str(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            stream: false,
            options: self.options(),
        };
        let response: ChatResponse = self.post("/api/chat", model, &request).await?;
        Ok(response
            .message
            .map(|m| m.content.trim().to_string())
            .unwrap_or_default())
    }

    async fn available_models(&self) -> Result<Vec<Model>, InferenceError> {
        self.list_models().await
    }
}

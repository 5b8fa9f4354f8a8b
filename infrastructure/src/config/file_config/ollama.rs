//! Inference server configuration from TOML (`[ollama]` section)
//!
//! ```toml
//! [ollama]
//! base_url = "http://localhost:11434"
//! timeout_secs = 60
//! max_attempts = 2
//! retry_delay_ms = 1000
//! temperature = 0.7
//! max_tokens = 100
//! ```

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use crate::ollama::OllamaSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        let settings = OllamaSettings::default();
        Self {
            base_url: settings.base_url,
            timeout_secs: settings.timeout.as_secs(),
            max_attempts: settings.max_attempts,
            retry_delay_ms: settings.retry_delay.as_millis() as u64,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

impl FileOllamaConfig {
    pub fn to_settings(&self) -> OllamaSettings {
        OllamaSettings {
            base_url: self.base_url.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_attempts: self.max_attempts.max(1),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            temperature: self.temperature,
            max_tokens: self.max_tokens.max(1),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: "ollama.base_url".to_string(),
                    value: self.base_url.clone(),
                    valid_values: vec!["http://...".to_string(), "https://...".to_string()],
                },
                format!("ollama.base_url: '{}' is not an http(s) URL", self.base_url),
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(out_of_range("ollama.timeout_secs", "must be at least 1"));
        }
        if self.max_attempts == 0 {
            issues.push(out_of_range("ollama.max_attempts", "must be at least 1"));
        }
        if self.max_tokens == 0 {
            issues.push(out_of_range("ollama.max_tokens", "must be at least 1"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "ollama.temperature".to_string(),
                },
                format!(
                    "ollama.temperature: {} is outside 0.0..=2.0 and may be rejected by the server",
                    self.temperature
                ),
            ));
        }

        issues
    }
}

fn out_of_range(field: &str, detail: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{field}: {detail}"),
    )
}

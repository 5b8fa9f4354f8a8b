//! Model value object representing an inference-server model tag

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model families that emit a reasoning preamble unless told not to.
const THINKING_FAMILIES: &[&str] = &["qwen3", "deepseek-r1", "qwq"];

/// A model tag served by the inference backend (Value Object)
///
/// Tags follow the `name:variant` convention used by local model servers,
/// e.g. `mistral:7b` or `llama3.2:3b-instruct-q4_0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Family part of the tag (`qwen3:8b` -> `qwen3`)
    pub fn family(&self) -> &str {
        self.0.split(':').next().unwrap_or(&self.0)
    }

    /// Whether this model produces hidden reasoning by default and needs
    /// an explicit directive to answer directly.
    pub fn is_thinking_model(&self) -> bool {
        let tag = self.0.to_lowercase();
        THINKING_FAMILIES.iter().any(|family| tag.contains(family))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

//! Ollama inference adapter
//!
//! [`OllamaClient`] talks to a local Ollama server over HTTP and
//! implements the application's `InferenceClient` port.

mod client;
mod types;

pub use client::{OllamaClient, OllamaSettings};

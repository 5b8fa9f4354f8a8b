//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod broadcaster;
pub mod conversation_logger;
pub mod human_action;
pub mod inference_client;
pub mod word_provider;

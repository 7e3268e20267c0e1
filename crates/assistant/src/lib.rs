//! Client library for the question-answering collaborator.
//!
//! Serializes stored records into a CSV snapshot, wraps it in the
//! data-assistant prompt, and forwards free-text questions to an
//! OpenAI-compatible chat-completion endpoint.

pub mod client;
pub mod snapshot;

pub use client::{AssistantClient, AssistantConfig, AssistantError};

//! Chat/vision completion collaborator
//!
//! OpenAI-compatible chat-completions wire types, the [`CompletionClient`]
//! seam, the reqwest-backed [`GroqClient`], and a deterministic
//! [`MockCompletion`] for tests.

pub mod api_types;
mod client;
mod groq;
pub mod mock;

pub use api_types::{
    AssistantMessage, ChatMessage, ChatRequest, ChatResponse, Choice, ContentPart, ImageUrl,
    MessageContent, Role,
};
pub use client::{CompletionClient, ServiceError};
pub use groq::{GroqClient, API_KEY_ENV};
pub use mock::MockCompletion;

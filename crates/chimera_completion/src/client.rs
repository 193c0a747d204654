use crate::api_types::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// Failure talking to the completion service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The service answered with a non-success HTTP status.
    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a response.
    #[error("failed to reach completion service")]
    Transport(#[from] reqwest::Error),
    /// A success response with nothing to read.
    #[error("completion response contained no choices")]
    EmptyResponse,
}

/// Seam for the chat/vision completion collaborator.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one chat-completions request and return the parsed response.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError>;
}

//! Text handler: forward the literal text to the chat model.

use super::{HandlerOutcome, LatencyRule};
use crate::error::PipelineError;
use chimera_completion::{ChatMessage, ChatRequest, CompletionClient};
use chimera_core::config::CompletionConfig;
use chimera_core::{Modality, ProcessedContent};

/// Send `text` as a single user message, no system instruction, and return
/// the completion verbatim.
pub(crate) async fn run(
    client: &dyn CompletionClient,
    config: &CompletionConfig,
    text: String,
) -> Result<HandlerOutcome, PipelineError> {
    let request = ChatRequest {
        model: config.text_model.clone(),
        messages: vec![ChatMessage::user(text)],
        temperature: None,
        max_tokens: None,
    };
    let reply = client.complete(request).await?.into_text()?;

    Ok(HandlerOutcome {
        modality: Modality::Text,
        content: ProcessedContent::text(reply),
        model_used: config.text_model.clone(),
        latency: LatencyRule::Measured,
    })
}

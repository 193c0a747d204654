//! Structured-data handler: serialize the record and ask for an analysis.

use super::{HandlerOutcome, LatencyRule};
use crate::error::PipelineError;
use chimera_completion::{ChatMessage, ChatRequest, CompletionClient};
use chimera_core::config::CompletionConfig;
use chimera_core::{Modality, ProcessedContent};
use serde_json::Value;

/// Reported latency for structured analysis. A constant, not a measurement.
pub(crate) const STRUCTURED_LATENCY_SECONDS: f64 = 0.85;

/// Serialize the record, wrap it in the fixed analysis prompt, and send it to
/// the chat model.
pub(crate) async fn run(
    client: &dyn CompletionClient,
    config: &CompletionConfig,
    record: serde_json::Map<String, Value>,
) -> Result<HandlerOutcome, PipelineError> {
    let query = format!(
        "Analyze this structured data and provide insights: {}",
        Value::Object(record)
    );
    let request = ChatRequest {
        model: config.text_model.clone(),
        messages: vec![ChatMessage::user(query)],
        temperature: None,
        max_tokens: None,
    };
    let reply = client.complete(request).await?.into_text()?;

    Ok(HandlerOutcome {
        modality: Modality::StructuredData,
        content: ProcessedContent::text(reply),
        model_used: config.text_model.clone(),
        latency: LatencyRule::Fixed(STRUCTURED_LATENCY_SECONDS),
    })
}

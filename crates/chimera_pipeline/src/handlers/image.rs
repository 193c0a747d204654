//! Image handler: read a local image file and ask the vision model about it.

use super::{HandlerOutcome, LatencyRule};
use crate::error::PipelineError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chimera_completion::{ChatMessage, ChatRequest, CompletionClient, ContentPart};
use chimera_core::config::CompletionConfig;
use chimera_core::{Modality, ProcessedContent};
use std::path::PathBuf;

const DESCRIBE_PROMPT: &str = "Describe this image in detail.";

/// Read the file at `path`, base64-encode it, and request a description from
/// the vision model. Takes local paths only; a missing file maps to the
/// not-found variant, every other read failure to a wrapped read error.
pub(crate) async fn run(
    client: &dyn CompletionClient,
    config: &CompletionConfig,
    path: PathBuf,
) -> Result<HandlerOutcome, PipelineError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PipelineError::ImageNotFound { path: path.clone() }
        } else {
            PipelineError::ImageRead {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let encoded = STANDARD.encode(&bytes);
    let request = ChatRequest {
        model: config.vision_model.clone(),
        messages: vec![ChatMessage::user_parts(vec![
            ContentPart::image_url(format!("data:image/jpeg;base64,{encoded}")),
            ContentPart::text(DESCRIBE_PROMPT),
        ])],
        temperature: None,
        max_tokens: None,
    };
    let reply = client.complete(request).await?.into_text()?;

    Ok(HandlerOutcome {
        modality: Modality::Image,
        content: ProcessedContent::text(reply),
        model_used: config.vision_model.clone(),
        latency: LatencyRule::Measured,
    })
}

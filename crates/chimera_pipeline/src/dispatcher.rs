//! Routing, timing, and envelope assembly.

use crate::error::PipelineError;
use crate::handlers::{self, HandlerOutcome, LatencyRule};
use chimera_completion::{CompletionClient, GroqClient};
use chimera_core::config::ChimeraConfig;
use chimera_core::error::{ClassificationError, ConfigError};
use chimera_core::{classify, Input, Modality, ProcessingResult};
use chimera_voice::VoiceStack;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Owns the process-scoped collaborator handles and routes each input to the
/// handler its modality selects.
///
/// The voice stack wraps shared mutable device handles; the lock serializes
/// audio turns so overlapping calls cannot interleave capture or playback.
/// The other handlers share nothing mutable and may overlap freely.
pub struct Dispatcher {
    config: ChimeraConfig,
    completion: Arc<dyn CompletionClient>,
    voice: Mutex<VoiceStack>,
}

impl Dispatcher {
    pub fn new(
        config: ChimeraConfig,
        completion: Arc<dyn CompletionClient>,
        voice: VoiceStack,
    ) -> Self {
        Self {
            config,
            completion,
            voice: Mutex::new(voice),
        }
    }

    /// Build a dispatcher backed by a [`GroqClient`], resolving the bearer
    /// token from `api_key` or the `GROQ_API_KEY` environment variable.
    /// Fails fast when neither is present.
    pub fn from_env(
        config: ChimeraConfig,
        api_key: Option<String>,
        voice: VoiceStack,
    ) -> Result<Self, ConfigError> {
        let client = GroqClient::from_env(&config.completion.base_url, api_key)?;
        Ok(Self::new(config, Arc::new(client), voice))
    }

    /// Classify `input`, run the matching handler, and seal the envelope.
    ///
    /// Classification failures, service failures, and image file errors reach
    /// the caller; audio failures come back inside the envelope instead. The
    /// call fully resolves before returning: one input in, one envelope out.
    pub async fn process(&self, input: Input) -> Result<ProcessingResult, PipelineError> {
        // The capture sentinel bypasses classification entirely.
        if matches!(input, Input::MicrophoneCapture) {
            return Ok(self.run_audio().await);
        }

        let modality = classify::detect(&input)?;
        tracing::debug!(%modality, "classified input");

        let started = Instant::now();
        let outcome = match (modality, input) {
            (Modality::Text, Input::Text(text)) => {
                handlers::text::run(&*self.completion, &self.config.completion, text).await?
            }
            (Modality::Image, input) => {
                handlers::image::run(
                    &*self.completion,
                    &self.config.completion,
                    image_path_from(input),
                )
                .await?
            }
            (Modality::StructuredData, Input::StructuredRecord(record)) => {
                handlers::structured::run(&*self.completion, &self.config.completion, record)
                    .await?
            }
            (Modality::Audio, _) => {
                // Audio-classified bytes carry no usable payload; the handler
                // owns its input and reads the microphone.
                let mut voice = self.voice.lock().await;
                handlers::audio::run(
                    &mut voice,
                    &*self.completion,
                    &self.config.completion,
                    &self.config.voice,
                )
                .await
            }
            (Modality::Url, _) => {
                return Err(ClassificationError::UnroutableModality(Modality::Url).into())
            }
            // detect() pairs each remaining modality with exactly one input
            // shape; any other combination cannot reach this point.
            (modality, _) => {
                return Err(ClassificationError::UnroutableModality(modality).into());
            }
        };
        Ok(seal(outcome, started))
    }

    async fn run_audio(&self) -> ProcessingResult {
        let started = Instant::now();
        let mut voice = self.voice.lock().await;
        let outcome = handlers::audio::run(
            &mut voice,
            &*self.completion,
            &self.config.completion,
            &self.config.voice,
        )
        .await;
        seal(outcome, started)
    }
}

/// Stamp the latency and produce the caller-facing envelope.
fn seal(outcome: HandlerOutcome, started: Instant) -> ProcessingResult {
    let latency_seconds = match outcome.latency {
        LatencyRule::Measured => started.elapsed().as_secs_f64(),
        LatencyRule::Fixed(seconds) => seconds,
    };
    ProcessingResult {
        input_type: outcome.modality,
        processed_content: outcome.content,
        model_used: outcome.model_used,
        latency_seconds,
    }
}

/// The image handler reads local files only. Path inputs pass through; inline
/// image strings and image-classified byte blobs are handed over as paths
/// verbatim and fail with the not-found error when nothing resolves.
fn image_path_from(input: Input) -> PathBuf {
    match input {
        Input::FilePath(path) => path,
        Input::Text(text) => PathBuf::from(text),
        Input::RawBytes(bytes) => PathBuf::from(String::from_utf8_lossy(&bytes).into_owned()),
        _ => PathBuf::new(),
    }
}

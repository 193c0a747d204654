//! Audio handler: capture, transcribe, answer, speak.
//!
//! The one handler that never fails outward. Every failure, from the device
//! to the completion service, is folded into the returned envelope as an
//! in-band error string with `latency` pinned to `0.0`.

use super::{HandlerOutcome, LatencyRule};
use chimera_completion::{ChatMessage, ChatRequest, CompletionClient, ServiceError};
use chimera_core::config::{CompletionConfig, VoiceConfig};
use chimera_core::{Modality, ProcessedContent};
use chimera_voice::{TranscribeError, VoiceStack};

/// System instruction for the conversational voice turn.
const VOICE_SYSTEM_PROMPT: &str =
    "You are a helpful voice assistant. Keep responses concise and natural.";

/// Model identifier reported on the caught-failure paths.
const SPEECH_RECOGNITION_MODEL: &str = "speech_recognition";

/// Run one full voice turn. Takes no caller payload; the microphone is the
/// input.
pub(crate) async fn run(
    voice: &mut VoiceStack,
    client: &dyn CompletionClient,
    completion: &CompletionConfig,
    voice_cfg: &VoiceConfig,
) -> HandlerOutcome {
    match voice_turn(voice, client, completion, voice_cfg).await {
        Ok((transcribed_text, response)) => HandlerOutcome {
            modality: Modality::Audio,
            content: ProcessedContent::voice_exchange(transcribed_text, response),
            model_used: completion.text_model.clone(),
            latency: LatencyRule::Measured,
        },
        Err(VoiceTurnError::NoMatch) => {
            tracing::warn!("speech recognizer produced no hypothesis");
            HandlerOutcome {
                modality: Modality::Audio,
                content: ProcessedContent::error("Could not understand audio"),
                model_used: SPEECH_RECOGNITION_MODEL.to_string(),
                latency: LatencyRule::Fixed(0.0),
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "audio turn failed");
            HandlerOutcome {
                modality: Modality::Audio,
                content: ProcessedContent::error(format!("Error processing audio: {err}")),
                model_used: SPEECH_RECOGNITION_MODEL.to_string(),
                latency: LatencyRule::Fixed(0.0),
            }
        }
    }
}

async fn voice_turn(
    voice: &mut VoiceStack,
    client: &dyn CompletionClient,
    completion: &CompletionConfig,
    voice_cfg: &VoiceConfig,
) -> Result<(String, String), VoiceTurnError> {
    // The device is held only for the duration of this call; `capture_utterance`
    // releases it before returning, whatever happens afterwards.
    let clip = voice.capture.capture_utterance().await?;
    let transcript = voice.stt.transcribe(&clip).await?;
    tracing::debug!(chars = transcript.len(), "transcribed utterance");

    let request = ChatRequest {
        model: completion.text_model.clone(),
        messages: vec![
            ChatMessage::system(VOICE_SYSTEM_PROMPT),
            ChatMessage::user(transcript.clone()),
        ],
        temperature: Some(voice_cfg.reply_temperature),
        max_tokens: Some(voice_cfg.reply_max_tokens),
    };
    let reply = client.complete(request).await?.into_text()?;

    // Playback runs to completion before the envelope is produced.
    voice.tts.speak(&reply).await?;

    Ok((transcript, reply))
}

#[derive(Debug, thiserror::Error)]
enum VoiceTurnError {
    #[error("could not understand audio")]
    NoMatch,
    #[error("{0}")]
    Other(String),
}

impl From<TranscribeError> for VoiceTurnError {
    fn from(err: TranscribeError) -> Self {
        match err {
            TranscribeError::NoMatch => Self::NoMatch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for VoiceTurnError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<ServiceError> for VoiceTurnError {
    fn from(err: ServiceError) -> Self {
        Self::Other(err.to_string())
    }
}

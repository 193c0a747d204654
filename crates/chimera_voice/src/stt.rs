//! Speech-to-Text (STT) trait definition

use crate::capture::AudioClip;
use async_trait::async_trait;

/// Why a transcription attempt produced no text.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    /// The recognizer produced no hypothesis for the utterance.
    #[error("could not understand audio")]
    NoMatch,
    /// The recognition service could not be reached or refused the request.
    #[error("could not request results: {0}")]
    Service(String),
    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Speech-to-Text trait for transcribing a captured clip to text
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe one clip.
    ///
    /// Returns [`TranscribeError::NoMatch`] when the audio carried no
    /// recognizable speech; callers decide whether that is an error.
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscribeError>;

    /// Get the name of this STT provider
    fn provider_name(&self) -> &'static str;
}

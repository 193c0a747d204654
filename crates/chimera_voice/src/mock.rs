//! Scripted voice collaborators — deterministic behavior for tests and
//! keyboard-only development, no audio devices required.

use crate::capture::{AudioCapture, AudioClip, AudioFormat};
use crate::stt::{SpeechToText, TranscribeError};
use crate::tts::SpeechSynthesizer;
use anyhow::Result;
use async_trait::async_trait;
use chimera_core::config::VoiceConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Capture that returns a canned clip after a short simulated listen.
pub struct ScriptedCapture {
    script: CaptureScript,
}

enum CaptureScript {
    Clip(AudioClip),
    Fail(String),
}

impl ScriptedCapture {
    /// Always yields `clip`.
    pub fn returning(clip: AudioClip) -> Self {
        Self {
            script: CaptureScript::Clip(clip),
        }
    }

    /// Yields a short silent WAV clip.
    pub fn silent() -> Self {
        Self::returning(AudioClip {
            data: vec![0; 64],
            format: AudioFormat::Wav,
        })
    }

    /// Always fails with `message` (device unavailable, permission denied).
    pub fn failing(message: &str) -> Self {
        Self {
            script: CaptureScript::Fail(message.to_string()),
        }
    }
}

#[async_trait]
impl AudioCapture for ScriptedCapture {
    async fn capture_utterance(&mut self) -> Result<AudioClip> {
        // Simulated listen window.
        tokio::time::sleep(Duration::from_millis(10)).await;
        match &self.script {
            CaptureScript::Clip(clip) => Ok(clip.clone()),
            CaptureScript::Fail(message) => anyhow::bail!("{message}"),
        }
    }

    fn device_name(&self) -> &'static str {
        "scripted"
    }
}

/// Recognizer with a fixed outcome.
pub struct ScriptedStt {
    script: SttScript,
}

enum SttScript {
    Transcript(String),
    NoMatch,
    Fail(String),
}

impl ScriptedStt {
    /// Always transcribes to `text`.
    pub fn with_transcript(text: &str) -> Self {
        Self {
            script: SttScript::Transcript(text.to_string()),
        }
    }

    /// Always signals that the audio carried no recognizable speech.
    pub fn no_match() -> Self {
        Self {
            script: SttScript::NoMatch,
        }
    }

    /// Always fails as an unreachable recognition service.
    pub fn failing(message: &str) -> Self {
        Self {
            script: SttScript::Fail(message.to_string()),
        }
    }
}

#[async_trait]
impl SpeechToText for ScriptedStt {
    async fn transcribe(&self, _clip: &AudioClip) -> Result<String, TranscribeError> {
        match &self.script {
            SttScript::Transcript(text) => Ok(text.clone()),
            SttScript::NoMatch => Err(TranscribeError::NoMatch),
            SttScript::Fail(message) => Err(TranscribeError::Service(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Synthesizer that records what it was asked to speak instead of playing it.
///
/// Clones share the transcript, so a test can keep a handle while the
/// dispatcher owns the boxed original.
#[derive(Clone)]
pub struct ScriptedSynthesizer {
    rate: u32,
    volume: f32,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSynthesizer {
    pub fn new() -> Self {
        Self::with_settings(&VoiceConfig::default())
    }

    /// Apply the process-wide rate/volume settings, the way a device-backed
    /// engine would at startup.
    pub fn with_settings(config: &VoiceConfig) -> Self {
        Self {
            rate: config.rate,
            volume: config.volume,
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for ScriptedSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn speak(&mut self, text: &str) -> Result<()> {
        tracing::debug!(rate = self.rate, volume = self.volume, "speaking reply");
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_capture_round_trip() {
        let mut capture = ScriptedCapture::silent();
        let clip = capture.capture_utterance().await.unwrap();
        assert_eq!(clip.format, AudioFormat::Wav);
        assert!(!clip.data.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_capture_failure() {
        let mut capture = ScriptedCapture::failing("no default input device");
        let err = capture.capture_utterance().await.unwrap_err();
        assert!(err.to_string().contains("no default input device"));
    }

    #[tokio::test]
    async fn test_scripted_stt_outcomes() {
        let clip = AudioClip {
            data: vec![0; 8],
            format: AudioFormat::Wav,
        };

        let stt = ScriptedStt::with_transcript("hello");
        assert_eq!(stt.transcribe(&clip).await.unwrap(), "hello");

        let stt = ScriptedStt::no_match();
        assert!(matches!(
            stt.transcribe(&clip).await.unwrap_err(),
            TranscribeError::NoMatch
        ));

        let stt = ScriptedStt::failing("recognition service down");
        assert!(matches!(
            stt.transcribe(&clip).await.unwrap_err(),
            TranscribeError::Service(_)
        ));
    }

    #[tokio::test]
    async fn test_synthesizer_records_in_order() {
        let mut tts = ScriptedSynthesizer::new();
        tts.speak("one").await.unwrap();
        tts.speak("two").await.unwrap();
        assert_eq!(tts.spoken(), vec!["one", "two"]);
        assert_eq!(tts.rate(), 180);
    }
}

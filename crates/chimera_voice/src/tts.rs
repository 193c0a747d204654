//! Text-to-Speech (TTS) trait definition

use anyhow::Result;
use async_trait::async_trait;

/// Text-to-Speech trait for speaking a reply aloud
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and play it, returning once playback has finished.
    async fn speak(&mut self, text: &str) -> Result<()>;

    /// Get the name of this TTS provider
    fn provider_name(&self) -> &'static str;
}

//! Microphone capture seam.

use anyhow::Result;
use async_trait::async_trait;

/// Audio formats a captured clip may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// WAV container
    Wav,
    /// MP3
    Mp3,
    /// OGG Opus
    OggOpus,
    /// Raw PCM
    Pcm { sample_rate: u32, channels: u8 },
}

impl AudioFormat {
    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::OggOpus => "audio/ogg",
            Self::Pcm { .. } => "audio/pcm",
        }
    }
}

/// One recorded utterance.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

/// Live audio capture from a microphone device.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Record a single utterance.
    ///
    /// The device is acquired for the duration of this call only and must be
    /// released before it returns, on the error path included.
    async fn capture_utterance(&mut self) -> Result<AudioClip>;

    /// Name of the backing device or driver.
    fn device_name(&self) -> &'static str;
}

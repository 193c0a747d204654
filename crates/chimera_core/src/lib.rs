//! Core types for Chimera
//!
//! Defines the accepted input shapes, the modality enumeration, the uniform
//! result envelope, the classifier, and the configuration layer. Everything
//! that talks to the outside world lives in the sibling crates.

pub mod classify;
pub mod config;
pub mod error;

pub use classify::detect;
pub use config::{ChimeraConfig, CompletionConfig, VoiceConfig};
pub use error::{ClassificationError, ConfigError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// An untyped value handed to the pipeline.
///
/// These five shapes are the only ones the system accepts; classification of
/// anything else fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// An opaque byte blob, image or recorded audio.
    RawBytes(Vec<u8>),
    /// Free text, a URL, or an inline base64 image.
    Text(String),
    /// A path naming a local image file.
    FilePath(PathBuf),
    /// An ordered string-keyed record.
    StructuredRecord(serde_json::Map<String, Value>),
    /// Sentinel with no payload: read one utterance from the live microphone.
    MicrophoneCapture,
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Self::RawBytes(bytes)
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Self::FilePath(path)
    }
}

impl From<serde_json::Map<String, Value>> for Input {
    fn from(record: serde_json::Map<String, Value>) -> Self {
        Self::StructuredRecord(record)
    }
}

/// The modality assigned to an input by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Image,
    Audio,
    StructuredData,
    Url,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::StructuredData => "structured_data",
            Self::Url => "url",
        })
    }
}

/// What a handler produced for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessedContent {
    /// A textual completion.
    Text { text: String },
    /// A full voice turn: what was heard and what was answered.
    VoiceExchange {
        transcribed_text: String,
        response: String,
    },
    /// An in-band error description. Only the audio handler produces these;
    /// every other handler surfaces its failures as errors instead.
    Error { message: String },
}

impl ProcessedContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn voice_exchange(transcribed_text: impl Into<String>, response: impl Into<String>) -> Self {
        Self::VoiceExchange {
            transcribed_text: transcribed_text.into(),
            response: response.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// The uniform envelope returned to every caller, regardless of modality.
///
/// `latency_seconds` is the wall-clock interval from handler invocation to
/// envelope assembly, measured in-process. It is never negative. It is `0.0`
/// only on the audio handler's caught-failure paths, and a fixed constant for
/// structured-data analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub input_type: Modality,
    pub processed_content: ProcessedContent,
    pub model_used: String,
    pub latency_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_display() {
        assert_eq!(Modality::Text.to_string(), "text");
        assert_eq!(Modality::StructuredData.to_string(), "structured_data");
        assert_eq!(Modality::Url.to_string(), "url");
    }

    #[test]
    fn test_processed_content_serializes_tagged() {
        let content = ProcessedContent::voice_exchange("hi", "hello there");
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"kind\":\"voice_exchange\""));
        assert!(json.contains("\"transcribed_text\":\"hi\""));

        let parsed: ProcessedContent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, content);
    }

    #[test]
    fn test_result_envelope_round_trips() {
        let result = ProcessingResult {
            input_type: Modality::Text,
            processed_content: ProcessedContent::text("fine"),
            model_used: "llama-3.3-70b-versatile".to_string(),
            latency_seconds: 0.42,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ProcessingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_input_from_impls() {
        assert!(matches!(Input::from("hello"), Input::Text(_)));
        assert!(matches!(Input::from(vec![0u8, 1]), Input::RawBytes(_)));
        assert!(matches!(
            Input::from(PathBuf::from("a.jpg")),
            Input::FilePath(_)
        ));
    }
}

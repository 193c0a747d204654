//! Voice collaborators for Chimera
//!
//! Microphone capture, Speech-to-Text, and Text-to-Speech seams. Concrete
//! device- or service-backed implementations are wired in by the embedding
//! application; this crate ships the traits plus scripted implementations
//! for tests and keyboard-only development.

mod capture;
mod stt;
mod tts;

pub mod mock;

pub use capture::{AudioCapture, AudioClip, AudioFormat};
pub use stt::{SpeechToText, TranscribeError};
pub use tts::SpeechSynthesizer;

/// The three voice collaborators a dispatcher owns, bundled.
///
/// Capture and playback wrap shared mutable device handles; callers must
/// serialize access (the dispatcher keeps the stack behind a lock).
pub struct VoiceStack {
    pub capture: Box<dyn AudioCapture>,
    pub stt: Box<dyn SpeechToText>,
    pub tts: Box<dyn SpeechSynthesizer>,
}

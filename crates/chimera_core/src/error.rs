use crate::Modality;

/// Fatal construction-time failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No bearer token was passed and the environment variable is unset.
    #[error("completion API key is required (pass one explicitly or set GROQ_API_KEY)")]
    MissingApiKey,
}

/// The input could not be classified or routed.
///
/// This is the one failure class that always reaches the caller; handler
/// failures from the audio path are folded into the result envelope instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("unsupported input type")]
    UnsupportedInput,
    /// A modality with no handler behind it.
    #[error("unsupported input type: {0}")]
    UnroutableModality(Modality),
}

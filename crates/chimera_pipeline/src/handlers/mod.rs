//! Capability handlers, one per routable modality.
//!
//! Shared failure policy: text, image, and structured-data handlers let their
//! failures bubble out of `process`; the audio handler alone converts every
//! failure into an in-band envelope.

pub(crate) mod audio;
pub(crate) mod image;
pub(crate) mod structured;
pub(crate) mod text;

use chimera_core::{Modality, ProcessedContent};

/// What a handler produced, before the dispatcher stamps the latency and
/// seals the caller-facing envelope.
pub(crate) struct HandlerOutcome {
    pub modality: Modality,
    pub content: ProcessedContent,
    pub model_used: String,
    pub latency: LatencyRule,
}

/// How `latency_seconds` is filled for an outcome.
pub(crate) enum LatencyRule {
    /// The wall-clock interval the dispatcher measured around the handler.
    Measured,
    /// A constant reported regardless of elapsed time.
    Fixed(f64),
}

use chimera_completion::ServiceError;
use chimera_core::error::ClassificationError;
use std::path::PathBuf;

/// Failure surface of [`crate::Dispatcher::process`].
///
/// Audio failures never appear here: the audio handler folds every failure
/// into the returned envelope. Everything else propagates.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("image file not found at path: {path}")]
    ImageNotFound { path: PathBuf },
    #[error("error reading image file: {path}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

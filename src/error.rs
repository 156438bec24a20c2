use thiserror::Error;
use tone_pipeline::PipelineError;

/// Errors surfaced by an editing session.
///
/// Every variant is terminal for the operation that produced it. None of
/// them end the session, and the last good frame stays on display.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    #[error("Failed to load image: {0}")]
    DecodeFailed(String),

    #[error("Failed to create final image: {0}")]
    RenderFailed(String),

    #[error("Preset store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("No image loaded")]
    NoImage,

    #[error("Nothing to export yet")]
    NothingToExport,

    #[error("Render scheduler has stopped")]
    SchedulerStopped,
}

impl From<PipelineError> for EditorError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::DecodeFailed(reason) => EditorError::DecodeFailed(reason),
            PipelineError::RenderFailed(reason) => EditorError::RenderFailed(reason),
        }
    }
}

/// Errors from a preset store, passed through to the caller unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Preset not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Corrupt preset file: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

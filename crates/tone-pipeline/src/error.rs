//! Error type for the tone-pipeline public API.

use std::fmt;

/// Errors produced while decoding a source or rendering a result.
///
/// Both variants are terminal for the attempted operation: no partially
/// processed image is ever returned alongside them.
///
/// # Example
///
/// ```
/// use tone_pipeline::{PipelineError, SourceImage};
///
/// let err = SourceImage::decode(b"not an image").unwrap_err();
/// assert!(matches!(err, PipelineError::DecodeFailed(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The source bytes could not be decoded into a processable image.
    DecodeFailed(String),
    /// The pipeline could not produce a final raster (zero extent,
    /// inconsistent buffer).
    RenderFailed(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::DecodeFailed(reason) => write!(f, "decode failed: {}", reason),
            PipelineError::RenderFailed(reason) => write!(f, "render failed: {}", reason),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        PipelineError::DecodeFailed(err.to_string())
    }
}

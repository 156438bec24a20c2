use crate::error::EditorError;
use std::sync::Arc;
use tone_pipeline::{AdjustmentPipeline, ParameterSet, PipelineError, RenderedImage, SourceImage};

/// Synchronous render backend.
///
/// Implementations must be pure functions of their inputs; they are called
/// from blocking worker threads.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError>;
}

impl Renderer for AdjustmentPipeline {
    fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError> {
        AdjustmentPipeline::render(self, source, params)
    }
}

/// Runs renders off the async runtime
#[derive(Clone)]
pub struct RenderService {
    renderer: Arc<dyn Renderer>,
}

impl RenderService {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Render a captured snapshot on the blocking pool.
    pub async fn render(
        &self,
        source: Arc<SourceImage>,
        params: ParameterSet,
    ) -> Result<RenderedImage, EditorError> {
        let renderer = self.renderer.clone();

        tokio::task::spawn_blocking(move || renderer.render(&source, &params))
            .await
            .map_err(|e| EditorError::RenderFailed(format!("Render task failed: {e}")))?
            .map_err(EditorError::from)
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new(Arc::new(AdjustmentPipeline::new()))
    }
}

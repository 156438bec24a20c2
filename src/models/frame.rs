use chrono::{DateTime, Utc};
use std::sync::Arc;
use tone_pipeline::{ParameterSet, RenderedImage};

/// A published render result.
///
/// Carries the parameters it was rendered with and the generation of the
/// change that triggered it, so consumers can tell which edit they are
/// looking at.
#[derive(Debug, Clone)]
pub struct Frame {
    pub generation: u64,
    pub params: ParameterSet,
    pub image: Arc<RenderedImage>,
    pub rendered_at: DateTime<Utc>,
}

impl Frame {
    pub fn new(generation: u64, params: ParameterSet, image: RenderedImage) -> Self {
        Self {
            generation,
            params,
            image: Arc::new(image),
            rendered_at: Utc::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

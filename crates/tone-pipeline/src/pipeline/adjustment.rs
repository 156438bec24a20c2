//! Whole-image rendering.

use super::stages::{brightness_contrast, desaturate, tone};
use crate::buffer::{RenderedImage, SourceImage};
use crate::color::{quantize, Srgb};
use crate::curve::ToneCurve;
use crate::error::PipelineError;
use crate::params::ParameterSet;

/// Per-pixel mapping for one parameter set.
///
/// Resolves the tone curve once so that each pixel costs one luma, one
/// fused brightness/contrast step and one cubic evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ToneMapper {
    brightness: f32,
    contrast: f32,
    curve: ToneCurve,
}

impl ToneMapper {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            brightness: params.brightness(),
            contrast: params.contrast(),
            curve: ToneCurve::from_params(params),
        }
    }

    /// Output grey level in 0.0..=1.0 for one source pixel.
    #[inline]
    pub fn level(&self, pixel: Srgb) -> f32 {
        let luma = desaturate(pixel);
        let adjusted = brightness_contrast(luma, self.brightness, self.contrast);
        tone(adjusted, &self.curve)
    }

    /// Output grey level quantized to 8 bits.
    #[inline]
    pub fn apply(&self, pixel: Srgb) -> u8 {
        quantize(self.level(pixel))
    }

    pub fn curve(&self) -> &ToneCurve {
        &self.curve
    }
}

/// Renders a [`SourceImage`] with a [`ParameterSet`].
///
/// The pipeline holds no state; [`AdjustmentPipeline::render`] takes `&self`
/// and is safe to call concurrently. Rendering the same source with the same
/// parameters produces identical bytes.
///
/// # Example
///
/// ```
/// use tone_pipeline::{AdjustmentPipeline, ParameterSet, SourceImage, Srgb};
///
/// let source = SourceImage::from_pixels(1, 1, vec![Srgb::from_u8(0, 255, 0)]).unwrap();
/// let out = AdjustmentPipeline::new().render(&source, &ParameterSet::default()).unwrap();
///
/// let [r, g, b, a] = out.pixel(0, 0);
/// assert_eq!((r, g, b, a), (182, 182, 182, 255));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustmentPipeline;

impl AdjustmentPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Desaturate, adjust and tone-map every pixel.
    ///
    /// # Errors
    /// [`PipelineError::RenderFailed`] if the source has zero extent.
    pub fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError> {
        let (width, height) = source.dimensions();
        if source.is_empty() {
            return Err(PipelineError::RenderFailed(format!(
                "zero-extent image ({}x{})",
                width, height
            )));
        }

        let mapper = ToneMapper::new(params);
        let mut data = Vec::with_capacity(source.len() * 4);
        for (&pixel, &alpha) in source.pixels().iter().zip(source.alpha()) {
            let grey = mapper.apply(pixel);
            data.extend_from_slice(&[grey, grey, grey, alpha]);
        }

        RenderedImage::new(width, height, data)
    }
}

/// Render with a default [`AdjustmentPipeline`].
pub fn render(source: &SourceImage, params: &ParameterSet) -> Result<RenderedImage, PipelineError> {
    AdjustmentPipeline::new().render(source, params)
}

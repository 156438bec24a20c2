//! The three per-pixel stages, in application order.

use crate::color::{rec709_luma, Srgb};
use crate::curve::ToneCurve;

/// Stage 1: collapse a color to its Rec. 709 luma.
#[inline]
pub fn desaturate(pixel: Srgb) -> f32 {
    rec709_luma(pixel)
}

/// Stage 2: brightness offset and contrast gain about 0.5, clamped once.
///
/// There is no clamp between the offset and the gain. A brightness that
/// pushes a value past 1.0 can be pulled back by a contrast below 1.0.
#[inline]
pub fn brightness_contrast(value: f32, brightness: f32, contrast: f32) -> f32 {
    ((value + brightness - 0.5) * contrast + 0.5).clamp(0.0, 1.0)
}

/// Stage 3: map through the tone curve.
#[inline]
pub fn tone(value: f32, curve: &ToneCurve) -> f32 {
    curve.evaluate(value)
}

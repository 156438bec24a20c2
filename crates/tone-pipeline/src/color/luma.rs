//! Luminance weighting and 8-bit quantization.

use super::srgb::Srgb;

/// Rec. 709 luma coefficients for R, G and B.
///
/// They sum to 1.0, so neutral greys keep their value when desaturated.
pub const REC709_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Weighted luma of a gamma-encoded pixel.
#[inline]
pub fn rec709_luma(pixel: Srgb) -> f32 {
    REC709_WEIGHTS[0] * pixel.r + REC709_WEIGHTS[1] * pixel.g + REC709_WEIGHTS[2] * pixel.b
}

/// Quantize a 0.0..=1.0 value to 8 bits, rounding to nearest.
#[inline]
pub fn quantize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

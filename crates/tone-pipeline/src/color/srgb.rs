//! sRGB color type

use super::luma::{quantize, rec709_luma};

/// A color in sRGB color space.
///
/// Values are gamma-encoded and in the range 0.0..=1.0 (mapping to 0..255
/// for 8-bit). Decoded photos are stored as `Srgb` so that every render
/// starts from the same floating point values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-encoded, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-encoded, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-encoded, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral grey with all three channels set to `value`.
    #[inline]
    pub fn grey(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use tone_pipeline::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    ///
    /// # Example
    /// ```
    /// use tone_pipeline::Srgb;
    /// let color = Srgb::new(1.0, 0.5, 0.0);
    /// let bytes = color.to_bytes();
    /// assert_eq!(bytes[0], 255);
    /// assert_eq!(bytes[2], 0);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Rec. 709 luma of this color.
    #[inline]
    pub fn luma(self) -> f32 {
        rec709_luma(self)
    }
}

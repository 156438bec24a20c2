//! Decoded, immutable source photo.

use crate::color::Srgb;
use crate::error::PipelineError;

/// A decoded photo, ready to be rendered any number of times.
///
/// Color is stored as gamma-encoded [`Srgb`] floats in row-major order,
/// alpha separately as 8-bit coverage. There is no mutating API: picking a
/// new photo means building a new `SourceImage`.
///
/// # Example
///
/// ```
/// use tone_pipeline::{SourceImage, Srgb};
///
/// let source = SourceImage::from_pixels(3, 1, vec![Srgb::grey(0.5); 3]).unwrap();
/// assert_eq!(source.dimensions(), (3, 1));
/// assert_eq!(source.alpha(), &[255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<Srgb>,
    alpha: Vec<u8>,
}

impl SourceImage {
    /// Decode encoded image bytes (JPEG, PNG, WebP, BMP, TIFF, GIF).
    ///
    /// Any pixel format the decoder understands is converted to 8-bit RGBA
    /// first, so 16-bit and grayscale sources are accepted as well.
    ///
    /// # Errors
    /// [`PipelineError::DecodeFailed`] if the format is unknown or the data
    /// is corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self, PipelineError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Build a source from a raw RGBA8 buffer in row-major order.
    ///
    /// # Errors
    /// [`PipelineError::DecodeFailed`] if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PipelineError> {
        let expected = pixel_count(width, height) * 4;
        if data.len() != expected {
            return Err(PipelineError::DecodeFailed(format!(
                "RGBA buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        let (pixels, alpha) = data
            .chunks_exact(4)
            .map(|px| (Srgb::from_u8(px[0], px[1], px[2]), px[3]))
            .unzip();

        Ok(Self {
            width,
            height,
            pixels,
            alpha,
        })
    }

    /// Build an opaque source from color values.
    ///
    /// # Errors
    /// [`PipelineError::DecodeFailed`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Srgb>) -> Result<Self, PipelineError> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(PipelineError::DecodeFailed(format!(
                "pixel buffer has {} entries, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            alpha: vec![255; pixels.len()],
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color values, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Alpha values, row-major, one per pixel.
    #[inline]
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the image has zero extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

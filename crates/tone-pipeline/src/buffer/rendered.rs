//! Finished RGBA8 raster.

use crate::error::PipelineError;

/// The output of one render.
///
/// Stores RGBA8 bytes in row-major order at the extent of the source it
/// was rendered from. Every pixel is neutral (R == G == B); alpha is copied
/// from the source unchanged.
///
/// # Example
///
/// ```
/// use tone_pipeline::RenderedImage;
///
/// let image = RenderedImage::new(1, 2, vec![10, 10, 10, 255, 90, 90, 90, 128]).unwrap();
/// assert_eq!(image.pixel(0, 1), [90, 90, 90, 128]);
/// assert_eq!(image.as_rgba8().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RenderedImage {
    /// Wrap an RGBA8 buffer.
    ///
    /// # Errors
    /// [`PipelineError::RenderFailed`] for a zero extent or when `data` is
    /// not exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::RenderFailed(format!(
                "zero-extent image ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PipelineError::RenderFailed(format!(
                "output buffer is {} bytes, expected {}",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
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

    /// Raw RGBA8 bytes, `width * height * 4` long.
    #[inline]
    pub fn as_rgba8(&self) -> &[u8] {
        &self.data
    }

    pub fn into_rgba8(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at (`x`, `y`).
    ///
    /// # Panics
    /// If the coordinate is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

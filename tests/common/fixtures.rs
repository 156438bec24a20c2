//! Test fixtures and constants.

use greyroom::services::image_io::encode_png;
use std::sync::Arc;
use std::time::Duration;
use tone_pipeline::{ParameterSet, RenderedImage, SourceImage, Srgb};

/// Settle delay used by scheduler tests
pub const SETTLE: Duration = Duration::from_millis(40);

/// Upper bound for any single wait in a test
pub const WAIT: Duration = Duration::from_secs(5);

/// Values from the end-to-end editing scenario
pub fn scenario_params() -> ParameterSet {
    ParameterSet::default()
        .with_brightness(0.2)
        .with_contrast(1.1)
        .with_shadows(0.3)
        .with_midtones(0.5)
        .with_highlights(0.8)
}

/// A colorful RGBA8 gradient with a few translucent pixels
pub fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let alpha = if (x + y) % 7 == 0 { 128 } else { 255 };
            data.extend_from_slice(&[
                (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8,
                (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8,
                ((x * 31 + y * 17) % 256) as u8,
                alpha,
            ]);
        }
    }
    data
}

/// Decoded colorful source image
pub fn color_source(width: u32, height: u32) -> Arc<SourceImage> {
    Arc::new(SourceImage::from_rgba8(width, height, gradient_rgba(width, height)).unwrap())
}

/// Flat grey source
pub fn grey_source(width: u32, height: u32, level: u8) -> Arc<SourceImage> {
    let pixels = vec![Srgb::from_u8(level, level, level); (width * height) as usize];
    Arc::new(SourceImage::from_pixels(width, height, pixels).unwrap())
}

/// The gradient encoded as a PNG file body
pub fn color_png(width: u32, height: u32) -> Vec<u8> {
    let image = RenderedImage::new(width, height, gradient_rgba(width, height)).unwrap();
    encode_png(&image, png::Compression::Fast).unwrap()
}

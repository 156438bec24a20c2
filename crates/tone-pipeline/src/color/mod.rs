//! Color types and luminance helpers
//!
//! All pipeline arithmetic runs on gamma-encoded sRGB values in 0.0..=1.0.
//! That is the space in which the tone curve control points (quarter, half
//! and three-quarter grey) are meaningful to the person moving the sliders.
//!
//! # Example
//!
//! ```
//! use tone_pipeline::Srgb;
//!
//! let pixel = Srgb::from_u8(255, 255, 255);
//! assert!((pixel.luma() - 1.0).abs() < 1e-6);
//! ```

mod luma;
mod srgb;

pub use luma::{quantize, rec709_luma, REC709_WEIGHTS};
pub use srgb::Srgb;

//! tone-pipeline: deterministic black-and-white tone adjustments
//!
//! This library turns a decoded photo plus five scalar parameters into a
//! finished black-and-white raster. It has no runtime, no logging and no
//! shared state: every entry point is a pure function of its inputs, which
//! makes it safe to call from any number of worker threads at once.
//!
//! # Quick Start
//!
//! ```
//! use tone_pipeline::{AdjustmentPipeline, ParameterSet, SourceImage, Srgb};
//!
//! let pixels = vec![Srgb::from_u8(200, 120, 40); 4];
//! let source = SourceImage::from_pixels(2, 2, pixels).unwrap();
//!
//! let params = ParameterSet::default()
//!     .with_brightness(0.2)
//!     .with_contrast(1.1);
//!
//! let rendered = AdjustmentPipeline::new().render(&source, &params).unwrap();
//! assert_eq!(rendered.width(), 2);
//! assert_eq!(rendered.height(), 2);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! sRGB input               (decoded once per photo, immutable)
//!     |
//!     v
//! [Desaturate]             (Rec. 709 luma, always applied)
//!     |
//!     v
//! [Brightness/Contrast]    (single fused stage:
//!     |                     (v + brightness - 0.5) * contrast + 0.5,
//!     |                     one clamp at the end)
//!     v
//! [Tone Curve]             (monotone cubic through
//!     |                     (0,0) (.25,S) (.5,M) (.75,H) (1,1))
//!     v
//! RGBA8 output             (native extent, alpha passed through)
//! ```
//!
//! ## Why Desaturate First
//!
//! The tone curve and the contrast gain are applied to a single luminance
//! value rather than to each color channel. Running them per channel on a
//! colored pixel bends each channel by a different amount and shifts hue;
//! running them on luma cannot.
//!
//! ## Why Brightness and Contrast Are Fused
//!
//! Applying brightness, clamping, and then applying contrast loses
//! information whenever the brightness offset pushes a value past 1.0 or
//! below 0.0: a contrast below 1.0 would have pulled it back into range.
//! The fused stage clamps exactly once, after both operations.
//!
//! # Determinism
//!
//! For a given source and [`ParameterSet`] the output is bit-identical across
//! runs. The pipeline uses plain sequential `f32` arithmetic with a fixed
//! evaluation order and no randomness.

pub mod buffer;
pub mod color;
pub mod curve;
pub mod error;
pub mod params;
pub mod pipeline;


pub use buffer::{RenderedImage, SourceImage};
pub use color::Srgb;
pub use curve::{CurvePoint, ToneCurve};
pub use error::PipelineError;
pub use params::{Parameter, ParameterRange, ParameterSet, ParseParameterError};
pub use pipeline::{render, AdjustmentPipeline, ToneMapper};

//! Desaturate, brightness/contrast, tone curve.

mod adjustment;
pub mod stages;

pub use adjustment::{render, AdjustmentPipeline, ToneMapper};

//! Image buffers at the two ends of the pipeline.
//!
//! - [`SourceImage`]: decoded once per photo, immutable, shared read-only
//!   with every render of that photo.
//! - [`RenderedImage`]: a finished RGBA8 raster at the source's extent.

mod rendered;
mod source;

pub use rendered::RenderedImage;
pub use source::SourceImage;

//! Greyroom - black-and-white photo editing
//!
//! Live tone adjustments over a debounced render scheduler, with saved
//! presets and PNG export. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod services;
pub mod surface;

//! Shared helpers for the Greyroom integration tests.
//!
//! Every test binary builds its own copy of this module and uses only part
//! of it.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod fixtures;
pub mod renderers;
pub mod session;

pub use assertions::*;
pub use renderers::{CountingRenderer, FailingRenderer, GatedRenderer};
pub use session::TestSession;

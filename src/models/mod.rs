pub mod config;
pub mod frame;
pub mod preset;

pub use config::{AppConfig, ExportCompression};
pub use frame::Frame;
pub use preset::{newest_first, Preset, PresetId};

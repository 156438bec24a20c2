pub mod image_io;
pub mod json_preset_store;
pub mod preset_store;
pub mod renderer;
pub mod scheduler;
pub mod session;

pub use image_io::{BytesSource, FileSource, ImageSink, ImageSource, PngFileSink};
pub use json_preset_store::JsonPresetStore;
pub use preset_store::{InMemoryPresetStore, PresetStore};
pub use renderer::{RenderService, Renderer};
pub use scheduler::{RecomputeScheduler, RenderEvent, SchedulerHandle, SchedulerState};
pub use session::EditSession;

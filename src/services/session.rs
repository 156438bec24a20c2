//! One editing session: live parameters, the current photo, presets and
//! export, in front of a [`RecomputeScheduler`].

use crate::error::EditorError;
use crate::models::{AppConfig, Frame, Preset};
use crate::services::image_io::{FileSource, ImageSink, ImageSource};
use crate::services::{
    JsonPresetStore, PresetStore, RecomputeScheduler, RenderEvent, RenderService,
    SchedulerHandle, SchedulerState,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tone_pipeline::{Parameter, ParameterSet, SourceImage};

/// Editing session.
///
/// The session is the only writer of the live [`ParameterSet`]: every
/// mutation goes through `&mut self` and is forwarded to the scheduler as a
/// value snapshot.
pub struct EditSession {
    params: ParameterSet,
    has_image: bool,
    scheduler: SchedulerHandle,
    store: Arc<dyn PresetStore>,
}

impl EditSession {
    pub fn new(render: RenderService, store: Arc<dyn PresetStore>, settle_delay: Duration) -> Self {
        Self {
            params: ParameterSet::default(),
            has_image: false,
            scheduler: RecomputeScheduler::spawn(render, settle_delay),
            store,
        }
    }

    /// Session with the default pipeline and a JSON preset file from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let store = Arc::new(JsonPresetStore::new(&config.presets_file));
        Self::new(RenderService::default(), store, config.settle_delay())
    }

    pub fn params(&self) -> ParameterSet {
        self.params
    }

    pub fn has_image(&self) -> bool {
        self.has_image
    }

    pub fn store(&self) -> &Arc<dyn PresetStore> {
        &self.store
    }

    /// Decode `bytes` and make the result the current photo.
    ///
    /// On failure the previous photo and its last frame stay in place.
    pub async fn load_image_bytes(&mut self, bytes: Vec<u8>) -> Result<(), EditorError> {
        let len = bytes.len();
        let decoded = tokio::task::spawn_blocking(move || SourceImage::decode(&bytes))
            .await
            .map_err(|e| EditorError::DecodeFailed(format!("Decode task failed: {e}")))?;

        match decoded {
            Ok(source) => self.set_source(Arc::new(source)),
            Err(e) => {
                tracing::warn!(bytes = len, error = %e, "Failed to decode image");
                Err(e.into())
            }
        }
    }

    /// Read and decode a photo from any [`ImageSource`].
    pub async fn load_image(&mut self, source: &dyn ImageSource) -> Result<(), EditorError> {
        tracing::debug!(source = %source.describe(), "Loading image");
        let bytes = source.read().await?;
        self.load_image_bytes(bytes).await
    }

    pub async fn load_image_path(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        self.load_image(&FileSource::new(path)).await
    }

    /// Use an already decoded photo. Renders immediately with the current
    /// parameters.
    pub fn set_source(&mut self, source: Arc<SourceImage>) -> Result<(), EditorError> {
        tracing::info!(
            width = source.width(),
            height = source.height(),
            "Loaded source image"
        );
        self.scheduler.set_source(source, self.params)?;
        self.has_image = true;
        Ok(())
    }

    /// Replace all five parameters.
    pub fn set_params(&mut self, params: ParameterSet) -> Result<(), EditorError> {
        self.params = params;
        self.scheduler.set_params(params)
    }

    /// Change one parameter. Returns the value actually stored after clamping.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) -> Result<f32, EditorError> {
        let mut params = self.params;
        let stored = params.set(parameter, value);
        self.set_params(params)?;
        Ok(stored)
    }

    /// Back to default parameters and no photo.
    pub fn reset(&mut self) -> Result<(), EditorError> {
        self.params = ParameterSet::default();
        self.has_image = false;
        self.scheduler.set_params(self.params)?;
        self.scheduler.clear()?;
        tracing::info!("Session reset");
        Ok(())
    }

    /// Snapshot the live parameters into the preset store.
    pub async fn save_preset(&self) -> Result<Preset, EditorError> {
        let preset = self.store.save(self.params).await?;
        tracing::debug!(id = %preset.id, params = %preset.params, "Saved preset");
        Ok(preset)
    }

    /// Overwrite the live parameters with a stored preset.
    pub async fn apply_preset(&mut self, preset: &Preset) -> Result<ParameterSet, EditorError> {
        let params = self.store.load(preset).await?;
        self.set_params(params)?;
        tracing::debug!(id = %preset.id, "Applied preset");
        Ok(params)
    }

    pub async fn delete_preset(&self, preset: &Preset) -> Result<(), EditorError> {
        Ok(self.store.delete(preset).await?)
    }

    /// Saved presets, newest first
    pub async fn list_presets(&self) -> Result<Vec<Preset>, EditorError> {
        Ok(self.store.list().await?)
    }

    pub fn latest_frame(&self) -> Option<Frame> {
        self.scheduler.latest_frame()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Whether a change is queued or a render is running
    pub fn is_processing(&self) -> bool {
        self.state() != SchedulerState::Idle
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RenderEvent> {
        self.scheduler.subscribe()
    }

    /// Wait until every queued change has been rendered or discarded.
    pub async fn settled(&self) -> Result<(), EditorError> {
        self.scheduler.settled().await
    }

    /// Wait for pending work, then return the displayed frame.
    pub async fn wait_for_frame(&self) -> Result<Option<Frame>, EditorError> {
        self.settled().await?;
        Ok(self.latest_frame())
    }

    /// Hand the displayed image to `sink`.
    pub async fn export(&self, sink: &dyn ImageSink) -> Result<Frame, EditorError> {
        if !self.has_image {
            return Err(EditorError::NoImage);
        }
        let frame = self.latest_frame().ok_or(EditorError::NothingToExport)?;
        sink.write(frame.image.clone()).await?;
        tracing::info!(
            sink = %sink.describe(),
            generation = frame.generation,
            "Export complete"
        );
        Ok(frame)
    }

    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
    }
}

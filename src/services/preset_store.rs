use crate::error::StoreError;
use crate::models::{newest_first, Preset};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tone_pipeline::ParameterSet;

/// Trait for preset persistence.
///
/// Stores hold value snapshots only. Nothing in a preset refers to an image
/// or to the session that saved it.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Snapshot `params` as a new preset
    async fn save(&self, params: ParameterSet) -> Result<Preset, StoreError>;

    /// All presets, newest first
    async fn list(&self) -> Result<Vec<Preset>, StoreError>;

    /// Remove a preset. `StoreError::NotFound` if it is already gone.
    async fn delete(&self, preset: &Preset) -> Result<(), StoreError>;

    /// Read back the parameters of a stored preset
    async fn load(&self, preset: &Preset) -> Result<ParameterSet, StoreError>;
}

/// In-memory preset storage
pub struct InMemoryPresetStore {
    presets: Arc<RwLock<Vec<Preset>>>,
}

impl InMemoryPresetStore {
    pub fn new() -> Self {
        Self {
            presets: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryPresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresetStore for InMemoryPresetStore {
    async fn save(&self, params: ParameterSet) -> Result<Preset, StoreError> {
        let preset = Preset::new(params);
        self.presets.write().await.push(preset.clone());
        Ok(preset)
    }

    async fn list(&self) -> Result<Vec<Preset>, StoreError> {
        let presets = self.presets.read().await;
        Ok(newest_first(presets.clone()))
    }

    async fn delete(&self, preset: &Preset) -> Result<(), StoreError> {
        let mut presets = self.presets.write().await;
        let index = presets
            .iter()
            .position(|p| p.id == preset.id)
            .ok_or(StoreError::NotFound)?;
        presets.remove(index);
        Ok(())
    }

    async fn load(&self, preset: &Preset) -> Result<ParameterSet, StoreError> {
        let presets = self.presets.read().await;
        presets
            .iter()
            .find(|p| p.id == preset.id)
            .map(|p| p.params)
            .ok_or(StoreError::NotFound)
    }
}

//! Preset store backed by a single JSON file.
//!
//! The file is the only source of truth: every operation re-reads it, and
//! every change rewrites it in full. Writes go to a sibling temp file which
//! is then renamed over the existing file, so a crash never leaves a
//! half-written preset file behind. Other processes saving to the same file
//! between two operations are picked up, not overwritten.

use crate::error::StoreError;
use crate::models::{newest_first, Preset};
use crate::services::PresetStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tone_pipeline::ParameterSet;

const FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PresetFile {
    version: u32,
    presets: Vec<Preset>,
}

/// JSON file preset storage
pub struct JsonPresetStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonPresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insertion-ordered presets currently on disk
    async fn read_file(&self) -> Result<Vec<Preset>, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No preset file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let file: PresetFile = serde_json::from_slice(&content)?;
        if file.version != FILE_VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported version {}",
                file.version
            )));
        }

        tracing::trace!(
            path = %self.path.display(),
            count = file.presets.len(),
            "Read presets"
        );
        Ok(file.presets)
    }

    async fn write_file(&self, presets: Vec<Preset>) -> Result<(), StoreError> {
        let file = PresetFile {
            version: FILE_VERSION,
            presets,
        };
        let json = serde_json::to_vec_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "presets.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PresetStore for JsonPresetStore {
    async fn save(&self, params: ParameterSet) -> Result<Preset, StoreError> {
        let _guard = self.lock.lock().await;
        let mut presets = self.read_file().await?;

        let preset = Preset::new(params);
        presets.push(preset.clone());
        self.write_file(presets).await?;

        tracing::info!(id = %preset.id, path = %self.path.display(), "Preset saved");
        Ok(preset)
    }

    async fn list(&self) -> Result<Vec<Preset>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(newest_first(self.read_file().await?))
    }

    async fn delete(&self, preset: &Preset) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut presets = self.read_file().await?;

        let index = presets
            .iter()
            .position(|p| p.id == preset.id)
            .ok_or(StoreError::NotFound)?;
        presets.remove(index);
        self.write_file(presets).await?;

        tracing::info!(id = %preset.id, "Preset deleted");
        Ok(())
    }

    async fn load(&self, preset: &Preset) -> Result<ParameterSet, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_file()
            .await?
            .into_iter()
            .find(|p| p.id == preset.id)
            .map(|p| p.params)
            .ok_or(StoreError::NotFound)
    }
}

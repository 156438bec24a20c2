use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tone_pipeline::ParameterSet;
use uuid::Uuid;

/// Store-internal identifier of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(Uuid);

impl PresetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable snapshot of a parameter set, taken on an explicit save.
///
/// Presets never reference an image. Applying one only overwrites the live
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: PresetId,
    pub created_at: DateTime<Utc>,
    pub params: ParameterSet,
}

impl Preset {
    /// Snapshot `params` with the current time.
    pub fn new(params: ParameterSet) -> Self {
        Self::with_timestamp(params, Utc::now())
    }

    pub fn with_timestamp(params: ParameterSet, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PresetId::generate(),
            created_at,
            params,
        }
    }

    /// One-line description for preset lists
    pub fn summary(&self) -> String {
        format!(
            "{}  {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.params
        )
    }
}

/// Sort presets newest first.
///
/// Presets saved within the same timestamp tick keep reverse insertion
/// order, so the most recent save still comes first.
pub fn newest_first(mut presets: Vec<Preset>) -> Vec<Preset> {
    presets.reverse();
    presets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    presets
}

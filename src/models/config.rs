use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Quiet period after the last edit before a render starts
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// JSON file holding saved presets
    #[serde(default = "default_presets_file")]
    pub presets_file: PathBuf,

    /// PNG compression level used on export
    #[serde(default)]
    pub export_compression: ExportCompression,
}

fn default_settle_delay_ms() -> u64 {
    150
}

fn default_presets_file() -> PathBuf {
    PathBuf::from("presets.json")
}

/// PNG compression setting for exports
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl ExportCompression {
    pub fn to_png(self) -> png::Compression {
        match self {
            ExportCompression::Fast => png::Compression::Fast,
            ExportCompression::Default => png::Compression::Default,
            ExportCompression::Best => png::Compression::Best,
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        settle_delay_ms = config.settle_delay_ms,
                        presets_file = %config.presets_file.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the configuration: explicit path, then `GREYROOM_CONFIG`,
    /// then built-in defaults. `GREYROOM_PRESETS` overrides the presets file.
    pub fn load(explicit: Option<&Path>) -> Self {
        let env_path = std::env::var_os("GREYROOM_CONFIG").map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::debug!("No config file given, using defaults");
                Self::default()
            }
        };

        if let Some(presets) = std::env::var_os("GREYROOM_PRESETS") {
            config.presets_file = PathBuf::from(presets);
        }
        config
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            presets_file: default_presets_file(),
            export_compression: ExportCompression::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.settle_delay_ms, 150);
        assert_eq!(config.settle_delay(), Duration::from_millis(150));
        assert_eq!(config.presets_file, PathBuf::from("presets.json"));
        assert_eq!(config.export_compression, ExportCompression::Default);
    }

    #[test]
    fn test_parse_full_yaml() {
        let config = AppConfig::from_yaml(
            "settle_delay_ms: 40\npresets_file: /tmp/looks.json\nexport_compression: best\n",
        )
        .unwrap();

        assert_eq!(config.settle_delay_ms, 40);
        assert_eq!(config.presets_file, PathBuf::from("/tmp/looks.json"));
        assert_eq!(config.export_compression, ExportCompression::Best);
    }

    #[test]
    fn test_parse_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml("export_compression: fast\n").unwrap();

        assert_eq!(config.settle_delay_ms, 150);
        assert_eq!(config.presets_file, PathBuf::from("presets.json"));
        assert_eq!(config.export_compression, ExportCompression::Fast);
    }

    #[test]
    fn test_parse_rejects_unknown_compression() {
        assert!(AppConfig::from_yaml("export_compression: maximum\n").is_err());
    }

    #[test]
    fn test_load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms: 75").unwrap();

        let config = AppConfig::load_from_path(file.path());
        assert_eq!(config.settle_delay_ms, 75);
    }

    #[test]
    fn test_load_from_path_missing_file_uses_defaults() {
        let config = AppConfig::load_from_path(Path::new("/nonexistent/greyroom.yaml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_path_invalid_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms: [not, a, number]").unwrap();

        let config = AppConfig::load_from_path(file.path());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_compression_maps_to_png() {
        assert!(matches!(
            ExportCompression::Fast.to_png(),
            png::Compression::Fast
        ));
        assert!(matches!(
            ExportCompression::Best.to_png(),
            png::Compression::Best
        ));
    }
}

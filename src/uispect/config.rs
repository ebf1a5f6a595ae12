use crate::error::{Result, UispectError};
use crate::model::LocatorKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COPY_FEEDBACK_MS: u64 = 1500;

/// Configuration for uispect, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UispectConfig {
    /// Locator field expected in records (`bounds` or `position`)
    #[serde(default)]
    pub locator: LocatorKind,

    /// How long the "copied" indicator stays on, in milliseconds
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,

    /// Batch file ingested when a session starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

fn default_copy_feedback_ms() -> u64 {
    DEFAULT_COPY_FEEDBACK_MS
}

impl Default for UispectConfig {
    fn default() -> Self {
        Self {
            locator: LocatorKind::default(),
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            seed_file: None,
        }
    }
}

impl UispectConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            UispectError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UispectConfig::default();
        assert_eq!(config.locator, LocatorKind::Bounds);
        assert_eq!(config.copy_feedback(), Duration::from_millis(1500));
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = UispectConfig::load(dir.path()).unwrap();
        assert_eq!(config, UispectConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = UispectConfig {
            locator: LocatorKind::Position,
            copy_feedback_ms: 800,
            seed_file: Some(PathBuf::from("seed.json")),
        };
        config.save(dir.path()).unwrap();

        let loaded = UispectConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"locator":"position"}"#).unwrap();

        let loaded = UispectConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.locator, LocatorKind::Position);
        assert_eq!(loaded.copy_feedback_ms, 1500);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"locator":"center"}"#).unwrap();

        let err = UispectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, UispectError::Config(_)));
    }
}

use crate::error::{NotebookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TITLE: &str = "New notebook";

/// User configuration, stored as `config.json` in the config directory.
///
/// Only consulted when a notebook file does not exist yet: the fresh notebook
/// gets its metadata from here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotebookConfig {
    /// Title given to newly created notebooks
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Author recorded in newly created notebooks
    #[serde(default)]
    pub default_author: String,

    /// Description recorded in newly created notebooks
    #[serde(default)]
    pub default_description: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            default_author: String::new(),
            default_description: String::new(),
        }
    }
}

impl NotebookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotebookError::Io)?;
        let config: NotebookConfig =
            serde_json::from_str(&content).map_err(NotebookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotebookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotebookError::Serialization)?;
        fs::write(config_path, content).map_err(NotebookError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NotebookConfig::default();
        assert_eq!(config.default_title, "New notebook");
        assert!(config.default_author.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = NotebookConfig::load(temp_dir.path().join("missing")).unwrap();
        assert_eq!(config, NotebookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = NotebookConfig {
            default_author: "Ada".to_string(),
            ..NotebookConfig::default()
        };
        config.save(temp_dir.path()).unwrap();

        let loaded = NotebookConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: NotebookConfig =
            serde_json::from_str(r#"{"default_author": "Ada"}"#).unwrap();
        assert_eq!(parsed.default_title, "New notebook");
        assert_eq!(parsed.default_author, "Ada");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "not json").unwrap();
        assert!(matches!(
            NotebookConfig::load(temp_dir.path()),
            Err(NotebookError::Serialization(_))
        ));
    }
}

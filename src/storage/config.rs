use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = ".stdict_mcp";
const CONFIG_FILE_NAME: &str = "config.json";

/// Per-user credential cache, stored as JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Config {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// Load from `path`, or the default location. A missing file is an empty config.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let json_content =
            serde_json::to_string_pretty(self).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        fs::write(&config_path, json_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    /// `~/.stdict_mcp/config.json`
    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Config path inside an explicit directory (`--config-dir`).
    pub fn file_path_in(dir: impl Into<PathBuf>) -> PathBuf {
        dir.into().join(CONFIG_FILE_NAME)
    }

    /// The stored key, ignoring empty strings.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_key, None);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = Config::with_api_key("ABCDEF0123");
        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(loaded_config, config);
        assert_eq!(loaded_config.api_key(), Some("ABCDEF0123"));
    }

    #[test]
    fn test_saved_file_is_plain_json_object() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");

        Config::with_api_key("키")
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let raw = fs::read_to_string(&config_path).expect("Failed to read config");
        assert!(raw.contains("\"api_key\": \"키\""));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("missing.json")));
        assert_eq!(config.expect("Missing file should load"), Config::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "not json").expect("Failed to write file");

        let result = Config::load(Some(config_path));
        assert!(matches!(result, Err(StorageError::ConfigParseError { .. })));
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let config = Config::with_api_key("");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_file_path_in() {
        let path = Config::file_path_in("/tmp/stdict");
        assert_eq!(path, PathBuf::from("/tmp/stdict/config.json"));
    }
}

//! Credential sources
//!
//! Each place an API key can live (environment, config file, OS keyring) is a
//! [`CredentialSource`] that answers "do you have a key?" without side effects.
//! The keyring is also a [`SecretStore`] so a freshly entered key can be written back.

use super::Result;
use super::config::Config;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub const ENV_KEY_NAME: &str = "STDICT_API_KEY";
pub const KEYRING_SERVICE: &str = "stdict_mcp";
pub const KEYRING_USERNAME: &str = "api_key";

/// A lookup that may or may not yield a key.
pub trait CredentialSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn probe(&self) -> Result<Option<String>>;
}

/// Platform secret storage for a single key.
pub trait SecretStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, value: &str) -> Result<()>;
    fn delete(&self) -> Result<()>;
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new(ENV_KEY_NAME)
    }
}

impl CredentialSource for EnvSource {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn probe(&self) -> Result<Option<String>> {
        Ok(env::var(&self.var).ok().filter(|k| !k.is_empty()))
    }
}

/// Reads `api_key` from the JSON config file.
#[derive(Debug, Clone)]
pub struct ConfigFileSource {
    path: PathBuf,
}

impl ConfigFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialSource for ConfigFileSource {
    fn name(&self) -> &'static str {
        "config file"
    }

    fn probe(&self) -> Result<Option<String>> {
        let config = Config::load(Some(self.path.clone()))?;
        Ok(config.api_key().map(str::to_string))
    }
}

/// Adapts a [`SecretStore`] to the lookup chain.
pub struct SecretStoreSource {
    store: Arc<dyn SecretStore>,
}

impl SecretStoreSource {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }
}

impl CredentialSource for SecretStoreSource {
    fn name(&self) -> &'static str {
        "secret store"
    }

    fn probe(&self) -> Result<Option<String>> {
        Ok(self.store.get()?.filter(|k| !k.is_empty()))
    }
}

/// OS keyring entry under a fixed service/username pair.
#[cfg(feature = "secret-store")]
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    username: String,
}

#[cfg(feature = "secret-store")]
impl Default for KeyringStore {
    fn default() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            username: KEYRING_USERNAME.to_string(),
        }
    }
}

#[cfg(feature = "secret-store")]
impl KeyringStore {
    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.username)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))
    }
}

#[cfg(feature = "secret-store")]
impl SecretStore for KeyringStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    fn set(&self, value: &str) -> Result<()> {
        self.entry()?
            .set_password(value)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))
    }

    fn delete(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(_) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }
}

/// The keyring store when the `secret-store` feature is compiled in.
pub fn platform_secret_store() -> Option<Arc<dyn SecretStore>> {
    #[cfg(feature = "secret-store")]
    {
        Some(Arc::new(KeyringStore::default()))
    }
    #[cfg(not(feature = "secret-store"))]
    {
        None
    }
}

/// Shorten a key for display: first and last four characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "*****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_source_when_set() {
        let var = "STDICT_TEST_ENV_SOURCE_SET";
        unsafe {
            env::set_var(var, "env_key_123");
        }
        let source = EnvSource::new(var);
        assert_eq!(
            source.probe().expect("env probe failed"),
            Some("env_key_123".to_string())
        );
        unsafe {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_env_source_when_empty() {
        let var = "STDICT_TEST_ENV_SOURCE_EMPTY";
        unsafe {
            env::set_var(var, "");
        }
        let source = EnvSource::new(var);
        assert_eq!(source.probe().expect("env probe failed"), None);
        unsafe {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_env_source_when_not_set() {
        let source = EnvSource::new("STDICT_TEST_ENV_SOURCE_NEVER_SET");
        assert_eq!(source.probe().expect("env probe failed"), None);
        assert_eq!(source.name(), "environment");
    }

    #[test]
    fn test_config_file_source_reads_key() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        Config::with_api_key("file_key")
            .save(Some(path.clone()))
            .expect("Failed to save config");

        let source = ConfigFileSource::new(path);
        assert_eq!(
            source.probe().expect("config probe failed"),
            Some("file_key".to_string())
        );
    }

    #[test]
    fn test_config_file_source_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let source = ConfigFileSource::new(temp_dir.path().join("config.json"));
        assert_eq!(source.probe().expect("config probe failed"), None);
    }

    #[test]
    fn test_config_file_source_broken_file_is_error() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{").expect("Failed to write file");

        let source = ConfigFileSource::new(path);
        assert!(source.probe().is_err());
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("ABCDEFGHIJKL"), "ABCD...IJKL");
        assert_eq!(mask_api_key("short"), "*****");
    }
}

//! API key resolution
//!
//! Sources are probed in a fixed order: environment, config file, secret
//! store. Any probe failure counts as "not found". When every source comes up
//! empty and the caller can reach a user, the key is requested interactively
//! and written back to both the secret store and the config file.

use crate::error::CredentialError;
use crate::storage::config::Config;
use crate::storage::credentials::{
    ConfigFileSource, CredentialSource, EnvSource, SecretStore, SecretStoreSource,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub const ELICITATION_MESSAGE: &str = "국립국어원 표준국어대사전 Open API 인증키를 입력해 주세요.";

/// Answer to an interactive request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElicitAction {
    Accept(String),
    Decline,
    Cancel,
}

/// Something that can ask a user for a value and wait for the answer.
#[async_trait]
pub trait Elicitor: Send + Sync {
    async fn elicit(&self, message: &str) -> Result<ElicitAction, CredentialError>;
}

/// Probe `sources` in order and stop at the first key. Later sources are not touched.
fn first_available(sources: &[Box<dyn CredentialSource>]) -> Option<(&'static str, String)> {
    for source in sources {
        match source.probe() {
            Ok(Some(key)) => {
                tracing::debug!(source = source.name(), "API key resolved");
                return Some((source.name(), key));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(source = source.name(), error = %e, "credential source failed");
            }
        }
    }
    None
}

pub struct CredentialResolver {
    env: EnvSource,
    config_path: Option<PathBuf>,
    secret_store: Option<Arc<dyn SecretStore>>,
}

impl CredentialResolver {
    pub fn new(
        env: EnvSource,
        config_path: Option<PathBuf>,
        secret_store: Option<Arc<dyn SecretStore>>,
    ) -> Self {
        Self {
            env,
            config_path,
            secret_store,
        }
    }

    fn sources(&self) -> Vec<Box<dyn CredentialSource>> {
        let mut sources: Vec<Box<dyn CredentialSource>> = vec![Box::new(self.env.clone())];
        if let Some(path) = &self.config_path {
            sources.push(Box::new(ConfigFileSource::new(path.clone())));
        }
        if let Some(store) = &self.secret_store {
            sources.push(Box::new(SecretStoreSource::new(Arc::clone(store))));
        }
        sources
    }

    /// First source that yields a key, with the source's name.
    pub fn locate(&self) -> Option<(&'static str, String)> {
        first_available(&self.sources())
    }

    /// Resolve a key, asking through `prompt` as a last resort.
    pub async fn resolve(&self, prompt: Option<&dyn Elicitor>) -> Result<String, CredentialError> {
        if let Some((_, key)) = self.locate() {
            return Ok(key);
        }

        let Some(prompt) = prompt else {
            return Err(CredentialError::Missing);
        };

        match prompt.elicit(ELICITATION_MESSAGE).await? {
            ElicitAction::Accept(value) => {
                let api_key = value.trim().to_string();
                if api_key.is_empty() {
                    return Err(CredentialError::Missing);
                }
                self.persist(&api_key);
                Ok(api_key)
            }
            ElicitAction::Decline | ElicitAction::Cancel => Err(CredentialError::Missing),
        }
    }

    /// Best-effort write to the secret store and the config file.
    ///
    /// Returns the names of the places that were written.
    pub fn persist(&self, api_key: &str) -> Vec<&'static str> {
        let mut written = Vec::new();

        if let Some(store) = &self.secret_store {
            match store.set(api_key) {
                Ok(()) => written.push("secret store"),
                Err(e) => tracing::warn!(error = %e, "failed to save API key to secret store"),
            }
        }

        if let Some(path) = &self.config_path {
            match Config::with_api_key(api_key).save(Some(path.clone())) {
                Ok(()) => written.push("config file"),
                Err(e) => tracing::warn!(error = %e, "failed to save API key to config file"),
            }
        }

        written
    }

    /// Remove persisted copies of the key. The environment is left alone.
    pub fn forget(&self) -> crate::Result<()> {
        if let Some(store) = &self.secret_store {
            store.delete()?;
        }
        if let Some(path) = &self.config_path {
            if path.exists() {
                Config::default().save(Some(path.clone()))?;
            }
        }
        Ok(())
    }
}

use super::types::SearchArgs;
use crate::AppError;
use crate::api::client::StdictClient;
use crate::api::models::{Entry, SearchResult};
use crate::core::credential_resolver::{CredentialResolver, Elicitor};
use crate::core::normalize::{normalize_entry, normalize_search};
use crate::display::render_entry;

/// Dictionary lookups: key resolution, remote call, normalization
pub struct DictionaryService {
    client: StdictClient,
    resolver: CredentialResolver,
}

impl DictionaryService {
    /// Create new DictionaryService instance
    pub fn new(client: StdictClient, resolver: CredentialResolver) -> Self {
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Search headwords. `prompt` is used only if no stored key exists.
    pub async fn search(
        &self,
        args: SearchArgs,
        prompt: Option<&dyn Elicitor>,
    ) -> Result<SearchResult, AppError> {
        let params = args.into_params()?;
        let key = self.resolver.resolve(prompt).await?;
        let raw = self.client.search(&key, &params).await?;
        Ok(normalize_search(&raw, params.start, params.num)?)
    }

    /// Fetch one entry by target code.
    pub async fn entry(
        &self,
        target_code: i64,
        prompt: Option<&dyn Elicitor>,
    ) -> Result<Entry, AppError> {
        let key = self.resolver.resolve(prompt).await?;
        let raw = self.client.view(&key, target_code).await?;
        Ok(normalize_entry(&raw, target_code)?)
    }

    /// Entry rendered as markdown. Never prompts.
    pub async fn entry_markdown(&self, target_code: i64) -> Result<String, AppError> {
        let entry = self.entry(target_code, None).await?;
        Ok(render_entry(&entry))
    }
}

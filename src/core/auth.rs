use crate::core::credential_resolver::{ElicitAction, Elicitor};
use crate::error::CredentialError;
use async_trait::async_trait;
use rpassword::prompt_password;

/// Asks for the API key on the controlling terminal with hidden input.
pub struct TerminalPrompt;

impl TerminalPrompt {
    /// Only offered when stdin is an interactive terminal.
    pub fn available() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Read one line with echo off. An empty line counts as a decline.
    pub fn read_key(message: &str) -> Result<ElicitAction, CredentialError> {
        let input = prompt_password(format!("{}\nAPI key: ", message))
            .map_err(|e| CredentialError::Elicitation(format!("Failed to read API key: {}", e)))?;

        if input.trim().is_empty() {
            Ok(ElicitAction::Decline)
        } else {
            Ok(ElicitAction::Accept(input))
        }
    }
}

#[async_trait]
impl Elicitor for TerminalPrompt {
    async fn elicit(&self, message: &str) -> Result<ElicitAction, CredentialError> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || Self::read_key(&message))
            .await
            .map_err(|e| CredentialError::Elicitation(format!("Prompt task failed: {}", e)))?
    }
}

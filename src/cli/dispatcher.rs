use crate::api::models::EntryDocument;
use crate::cli::main_types::{Commands, KeyCommands};
use crate::core::auth::TerminalPrompt;
use crate::core::credential_resolver::{ELICITATION_MESSAGE, ElicitAction, Elicitor};
use crate::core::services::dictionary_service::DictionaryService;
use crate::core::services::types::SearchArgs;
use crate::display::render_entry;
use crate::error::{AppError, CliError, CredentialError};
use crate::mcp::McpServer;
use crate::storage::credentials::mask_api_key;

pub struct Dispatcher {
    service: DictionaryService,
}

impl Dispatcher {
    pub fn new(service: DictionaryService) -> Self {
        Self { service }
    }

    pub async fn dispatch(self, command: Option<Commands>) -> Result<(), AppError> {
        match command.unwrap_or(Commands::Serve) {
            Commands::Serve => self.serve().await,
            Commands::Search {
                q,
                start,
                num,
                advanced,
            } => {
                let args = SearchArgs {
                    q,
                    start,
                    num,
                    advanced,
                };
                self.handle_search(args).await
            }
            Commands::Entry { target_code, json } => self.handle_entry(target_code, json).await,
            Commands::Key { command } => self.handle_key_command(command).await,
        }
    }

    async fn serve(self) -> Result<(), AppError> {
        tracing::debug!("starting MCP server on stdio");
        let server = McpServer::stdio(self.service);
        server.serve().await?;
        Ok(())
    }

    /// Terminal prompt, only when someone is there to answer it.
    fn terminal_prompt() -> Option<TerminalPrompt> {
        TerminalPrompt::available().then_some(TerminalPrompt)
    }

    async fn handle_search(&self, args: SearchArgs) -> Result<(), AppError> {
        let prompt = Self::terminal_prompt();
        let result = self
            .service
            .search(args, prompt.as_ref().map(|p| p as &dyn Elicitor))
            .await?;
        println!("{}", to_pretty_json(&result)?);
        Ok(())
    }

    async fn handle_entry(&self, target_code: i64, json: bool) -> Result<(), AppError> {
        let prompt = Self::terminal_prompt();
        let entry = self
            .service
            .entry(target_code, prompt.as_ref().map(|p| p as &dyn Elicitor))
            .await?;

        if json {
            println!("{}", to_pretty_json(&EntryDocument::from(entry))?);
        } else {
            println!("{}", render_entry(&entry));
        }
        Ok(())
    }

    async fn handle_key_command(&self, command: KeyCommands) -> Result<(), AppError> {
        let resolver = self.service.resolver();
        match command {
            KeyCommands::Set => {
                let api_key = match TerminalPrompt.elicit(ELICITATION_MESSAGE).await? {
                    ElicitAction::Accept(value) if !value.trim().is_empty() => {
                        value.trim().to_string()
                    }
                    _ => return Err(CredentialError::Missing.into()),
                };

                let written = resolver.persist(&api_key);
                if written.is_empty() {
                    println!("❌ API key could not be saved anywhere");
                } else {
                    println!("✅ API key saved to {}", written.join(" and "));
                }
                Ok(())
            }
            KeyCommands::Status => {
                match resolver.locate() {
                    Some((source, key)) => {
                        println!("API key: {} (from {})", mask_api_key(&key), source);
                    }
                    None => println!("No API key found"),
                }
                Ok(())
            }
            KeyCommands::Clear => {
                resolver.forget()?;
                println!("✅ Stored API key removed");
                Ok(())
            }
        }
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Cli(CliError::Output(e.to_string())))
}

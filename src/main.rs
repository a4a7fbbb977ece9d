use clap::Parser;
use std::path::PathBuf;
use stdict_mcp::api::client::StdictClient;
use stdict_mcp::cli::dispatcher::Dispatcher;
use stdict_mcp::cli::main_types::Cli;
use stdict_mcp::core::credential_resolver::CredentialResolver;
use stdict_mcp::core::services::dictionary_service::DictionaryService;
use stdict_mcp::storage::config::Config;
use stdict_mcp::storage::credentials::{EnvSource, platform_secret_store};
use stdict_mcp::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config_dir.as_ref() {
        Some(dir) => Some(Config::file_path_in(PathBuf::from(dir))),
        None => match Config::config_file_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "config file disabled");
                None
            }
        },
    };
    tracing::debug!(config = ?config_path, base_url = %cli.base_url, "starting");

    let client = match StdictClient::new(cli.base_url.clone()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error creating HTTP client: {}", err);
            std::process::exit(1);
        }
    };
    let resolver =
        CredentialResolver::new(EnvSource::default(), config_path, platform_secret_store());
    let dispatcher = Dispatcher::new(DictionaryService::new(client, resolver));

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error: {}", e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

use crate::api::client::DEFAULT_BASE_URL;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stdict-mcp")]
#[command(about = "MCP server and command line client for the Standard Korean Dictionary Open API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.json (default: ~/.stdict_mcp)
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "STDICT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,
    /// Search headwords and print the result as JSON
    Search {
        /// Search term
        q: String,
        /// Start position (minimum 1)
        #[arg(long, default_value = "1")]
        start: i64,
        /// Number of results (10-100)
        #[arg(long, default_value = "10")]
        num: i64,
        /// Detailed search: n or y
        #[arg(long, default_value = "n")]
        advanced: String,
    },
    /// Show one entry by target code
    Entry {
        target_code: i64,
        /// Print JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// API key management
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum KeyCommands {
    /// Prompt for the API key and store it
    Set,
    /// Show which source supplies the API key
    Status,
    /// Remove stored copies of the API key
    Clear,
}

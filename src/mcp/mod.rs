//! Model Context Protocol server
//!
//! JSON-RPC 2.0 over newline-delimited stdio. Exposes the `stdict_search` and
//! `stdict_entry` tools, the `stdict://help` resource and the
//! `stdict://entry/{target_code}` resource template. When the client declares
//! the elicitation capability, tool calls may ask it for a missing API key.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use server::McpServer;

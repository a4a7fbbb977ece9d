//! Standard Korean Dictionary (stdict) MCP adapter
//!
//! Exposes the National Institute of Korean Language dictionary Open API to
//! MCP hosts over stdio, and as a small command line client.

pub use error::AppError;

/// Main architecture layers (dependency flow: CLI/MCP → Core → API/Storage)
pub mod cli; // Command-line interface
pub mod core; // Business logic
pub mod mcp; // Model Context Protocol server
pub mod storage; // Configuration and credential persistence

/// Support modules (used across layers)
pub mod api; // Dictionary Open API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;

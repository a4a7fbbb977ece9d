//! Storage layer for stdict-mcp
//!
//! Handles the JSON config file and the credential sources (environment,
//! config file, OS keyring) that the resolver chains together.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;

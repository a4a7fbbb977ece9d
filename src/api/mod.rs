//! Dictionary Open API: HTTP client, response models, error envelope translation

pub mod client;
pub mod error_codes;
pub mod models;

//! Input validation for tool and CLI parameters
//!
//! The remote API rejects out-of-range windows with error 103, so requests
//! are clamped before they leave the process.

use crate::api::models::Advanced;
use crate::error::CliError;

pub const MIN_START: i64 = 1;
pub const MIN_NUM: i64 = 10;
pub const MAX_NUM: i64 = 100;

/// `start` is at least 1.
pub fn clamp_start(start: i64) -> i64 {
    start.max(MIN_START)
}

/// `num` is kept within [10, 100].
pub fn clamp_num(num: i64) -> i64 {
    num.clamp(MIN_NUM, MAX_NUM)
}

/// Only "n" and "y" are accepted.
pub fn validate_advanced(value: &str) -> crate::Result<Advanced> {
    Advanced::parse(value).ok_or_else(|| {
        CliError::InvalidArguments(format!(
            "Invalid advanced '{}': expected \"n\" or \"y\"",
            value
        ))
        .into()
    })
}

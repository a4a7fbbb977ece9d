//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Conversions from transport errors into `ApiError`
pub mod error_helpers;

/// Tracing subscriber setup
pub mod logging;

/// Character-safe text helpers
pub mod text;

/// Parameter clamping and validation
pub mod validation;

//! Business logic: key resolution, response normalization, services

pub mod auth;
pub mod credential_resolver;
pub mod normalize;
pub mod services;

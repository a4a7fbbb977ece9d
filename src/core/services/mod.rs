pub mod dictionary_service;
pub mod types;

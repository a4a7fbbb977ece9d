//! Display layer - human-readable rendering of dictionary records

pub mod markdown;

pub use markdown::render_entry;

//! Driven-side adapters: persistence and external services.

pub mod directory;
pub mod persistence;

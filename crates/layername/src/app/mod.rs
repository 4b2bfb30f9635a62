//! Application layer orchestrating domain logic and infrastructure.

pub mod export;
pub mod import;
pub mod prompt;
pub mod selection;

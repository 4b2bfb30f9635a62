//! Infrastructure adapters for IO, config, prompts, and logging.

pub mod config;
pub mod document;
pub mod logging;
pub mod selection_file;
pub mod terminal;

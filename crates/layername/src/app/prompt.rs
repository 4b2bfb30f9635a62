//! File selection prompts.

use std::path::PathBuf;

use anyhow::Result;

/// Asks the user where to read or write the name list. `Ok(None)` means the user declined.
pub trait PathPrompt {
    fn save_path(&mut self, title: &str, default_name: &str) -> Result<Option<PathBuf>>;

    fn open_path(&mut self, title: &str) -> Result<Option<PathBuf>>;
}

/// Non-interactive prompt answering with a path decided up front, e.g. from a CLI flag.
#[derive(Debug, Clone, Default)]
pub struct FixedPath(pub Option<PathBuf>);

impl FixedPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    pub fn declined() -> Self {
        Self(None)
    }
}

impl PathPrompt for FixedPath {
    fn save_path(&mut self, _title: &str, _default_name: &str) -> Result<Option<PathBuf>> {
        Ok(self.0.clone())
    }

    fn open_path(&mut self, _title: &str) -> Result<Option<PathBuf>> {
        Ok(self.0.clone())
    }
}

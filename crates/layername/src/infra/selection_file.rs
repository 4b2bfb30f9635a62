//! JSON-backed selections, standing in for a host application's live selection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::selection::Selection;
use crate::domain::errors::DomainError;
use crate::domain::model::SelectedObject;

/// A selection read from a JSON array of objects, each carrying at least a `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionFile {
    path: PathBuf,
    objects: Vec<SelectedObject>,
}

impl SelectionFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read selection file at {}", path.display()))?;
        let objects: Vec<SelectedObject> = serde_json::from_str(&data)
            .with_context(|| format!("invalid selection data in {}", path.display()))?;
        tracing::debug!(count = objects.len(), path = %path.display(), "loaded selection");
        Ok(Self { path, objects })
    }

    pub fn objects(&self) -> &[SelectedObject] {
        &self.objects
    }

    /// Write the selection to `path`, or back to where it was loaded from.
    pub fn save(&self, path: Option<&Path>, pretty: bool) -> Result<PathBuf> {
        let target = path.unwrap_or(&self.path);
        let data = if pretty {
            serde_json::to_string_pretty(&self.objects)
        } else {
            serde_json::to_string(&self.objects)
        }
        .context("failed to serialize selection")?;
        fs::write(target, data + "\n")
            .with_context(|| format!("failed to write selection to {}", target.display()))?;
        Ok(target.to_path_buf())
    }
}

impl Selection for SelectionFile {
    fn len(&self) -> usize {
        self.objects.len()
    }

    fn set_name(&mut self, index: usize, name: &str) -> Result<(), DomainError> {
        self.objects.set_name(index, name)
    }
}

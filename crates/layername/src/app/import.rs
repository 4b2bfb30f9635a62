//! Name list import: read an exported list, reverse it, and rename a selection with it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::prompt::PathPrompt;
use crate::app::selection::Selection;

const OPEN_TITLE: &str = "Select your exported layer name list (.txt)";

/// Why an import stopped before looking at the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    NoFileChosen,
    Unreadable { path: PathBuf, reason: String },
}

/// Result of an import run. Only `Renamed` means the selection was modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Cancelled(CancelReason),
    CountMismatch { selected: usize, names: usize },
    Renamed { count: usize },
    /// Dry run: `(index, name)` for every object that would be renamed.
    Planned { assignments: Vec<(usize, String)> },
}

/// Applies exported name lists to a selection.
#[derive(Debug, Default)]
pub struct Importer;

impl Importer {
    pub fn new() -> Self {
        Self
    }

    /// Rename every object in `selection` from the list chosen through `prompt`.
    ///
    /// The list is reversed before pairing, so the last exported name goes to index 0. When the
    /// counts differ no object is renamed.
    pub fn import(
        &self,
        prompt: &mut dyn PathPrompt,
        selection: &mut dyn Selection,
    ) -> Result<ImportOutcome> {
        let names = match self.load(prompt)? {
            Ok(names) => names,
            Err(reason) => return Ok(ImportOutcome::Cancelled(reason)),
        };
        if let Some(mismatch) = check_counts(selection.len(), names.len()) {
            return Ok(mismatch);
        }

        tracing::debug!(count = names.len(), "renaming selected objects");
        for (index, name) in names.iter().enumerate() {
            selection
                .set_name(index, name)
                .with_context(|| format!("failed to rename selected object {index}"))?;
        }
        tracing::info!(count = names.len(), "renamed selected objects");
        Ok(ImportOutcome::Renamed { count: names.len() })
    }

    /// Run the same checks as [`Importer::import`] for a selection of `selected` objects without
    /// renaming anything.
    pub fn plan(&self, prompt: &mut dyn PathPrompt, selected: usize) -> Result<ImportOutcome> {
        let names = match self.load(prompt)? {
            Ok(names) => names,
            Err(reason) => return Ok(ImportOutcome::Cancelled(reason)),
        };
        if let Some(mismatch) = check_counts(selected, names.len()) {
            return Ok(mismatch);
        }
        Ok(ImportOutcome::Planned {
            assignments: names.into_iter().enumerate().collect(),
        })
    }

    /// Choose and read the list, returning names already reversed.
    fn load(&self, prompt: &mut dyn PathPrompt) -> Result<Result<Vec<String>, CancelReason>> {
        let Some(path) = prompt.open_path(OPEN_TITLE)? else {
            tracing::info!("import cancelled before choosing a name list");
            return Ok(Err(CancelReason::NoFileChosen));
        };
        let mut names = match read_name_list(&path) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "name list could not be read");
                return Ok(Err(CancelReason::Unreadable {
                    path,
                    reason: err.to_string(),
                }));
            }
        };
        names.reverse();
        tracing::debug!(count = names.len(), path = %path.display(), "loaded name list");
        Ok(Ok(names))
    }
}

fn check_counts(selected: usize, names: usize) -> Option<ImportOutcome> {
    if selected == names {
        return None;
    }
    tracing::warn!(selected, names, "selected object count does not match name count");
    Some(ImportOutcome::CountMismatch { selected, names })
}

/// Read a name list file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_name_list(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(parse_name_list(&String::from_utf8_lossy(&bytes)))
}

/// Split `contents` into trimmed, non-empty names in file order.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A leading byte order mark is dropped.
pub fn parse_name_list(contents: &str) -> Vec<String> {
    let contents = contents.strip_prefix('\u{FEFF}').unwrap_or(contents);
    contents
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

//! Layer name export: flatten a document's layer tree into qualified names and write them out.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::prompt::PathPrompt;
use crate::domain::model::{Document, Node};
use crate::infra::config::Config;

const SAVE_TITLE: &str = "Save layer name list as";

/// Separator appended after every exported name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum LineEnding {
    /// Platform line separator.
    #[default]
    Native,
    /// `\n`
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Native if cfg!(windows) => "\r\n",
            LineEnding::Native | LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = LineEndingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" | "platform" | "" => Ok(LineEnding::Native),
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "windows" => Ok(LineEnding::Crlf),
            other => Err(LineEndingParseError::Unknown(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`LineEnding`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LineEndingParseError {
    #[error("unknown line ending '{0}'")]
    Unknown(String),
}

/// Runtime options controlling export behavior.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub line_ending: LineEnding,
    pub default_file_name: String,
}

impl ExportOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        let line_ending = <LineEnding as FromStr>::from_str(&config.export.line_ending())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to native line endings");
                LineEnding::Native
            });
        Self {
            line_ending,
            default_file_name: config.export.default_file_name(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No destination was chosen; nothing was written.
    Cancelled,
    /// `count` names were written to `path`.
    Written { path: PathBuf, count: usize },
}

/// Writes layer name lists for a document.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Ask `prompt` for a destination and write the document's qualified leaf names there.
    pub fn export(&self, document: &Document, prompt: &mut dyn PathPrompt) -> Result<ExportOutcome> {
        let Some(path) = prompt.save_path(SAVE_TITLE, &self.options.default_file_name)? else {
            tracing::info!("export cancelled before choosing a destination");
            return Ok(ExportOutcome::Cancelled);
        };

        let names = qualified_names(document);
        tracing::debug!(count = names.len(), path = %path.display(), "writing layer names");
        write_names(&path, &names, self.options.line_ending)?;

        let resolved = fs::canonicalize(&path).unwrap_or(path);
        tracing::info!(count = names.len(), path = %resolved.display(), "layer names exported");
        Ok(ExportOutcome::Written {
            path: resolved,
            count: names.len(),
        })
    }
}

/// Qualified names of every leaf in depth-first pre-order.
///
/// Containers are not emitted themselves; each contributes `<name>/` to the prefix of its
/// descendants. Names are used verbatim, so an empty container name yields an empty segment.
pub fn qualified_names(document: &Document) -> Vec<String> {
    let mut names = Vec::with_capacity(document.leaf_count());
    collect(&document.layers, "", &mut names);
    names
}

fn collect(nodes: &[Node], prefix: &str, names: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Leaf { name } => names.push(format!("{prefix}{name}")),
            Node::Container { name, children } => {
                collect(children, &format!("{prefix}{name}/"), names);
            }
        }
    }
}

/// Create or truncate `path` and write one name per line.
pub fn write_names(path: &Path, names: &[String], line_ending: LineEnding) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create export directory: {}", parent.display())
        })?;
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create name list at {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for name in names {
        write!(writer, "{name}{}", line_ending.as_str())
            .with_context(|| format!("failed to write name list to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush name list to {}", path.display()))?;
    Ok(())
}

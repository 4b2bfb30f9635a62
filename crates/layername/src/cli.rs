//! Command-line interface definitions and dispatch.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::export::{ExportOptions, ExportOutcome, Exporter, LineEnding};
use crate::app::import::{CancelReason, ImportOutcome, Importer};
use crate::app::prompt::{FixedPath, PathPrompt};
use crate::app::selection::Selection;
use crate::infra::config::Config;
use crate::infra::document::load_document;
use crate::infra::selection_file::SelectionFile;
use crate::infra::terminal::TerminalPrompt;

#[derive(Debug, Parser)]
#[command(name = "layername", author, version)]
#[command(about = "Export layer names from a layer tree and apply them to a selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra configuration file layered over user and workspace config
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the qualified name of every leaf layer to a text file
    Export {
        /// Layer document: .json, .yaml/.yml, or a directory
        #[arg(short, long, value_name = "PATH")]
        document: PathBuf,

        /// Destination file; prompts on the terminal when omitted
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Line separator written after each name
        #[arg(long, value_enum)]
        line_ending: Option<LineEnding>,
    },
    /// Rename selected objects from an exported name list, last name first
    Import {
        /// Selection file: JSON array of objects with a `name` field
        #[arg(short, long, value_name = "PATH")]
        selection: PathBuf,

        /// Name list to read; prompts on the terminal when omitted
        #[arg(short, long, value_name = "PATH")]
        names: Option<PathBuf>,

        /// Write the renamed selection here instead of back to the selection file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Show the planned renames without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How a run ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Cancelled,
    CountMismatch,
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => ExitCode::SUCCESS,
            Status::Cancelled => ExitCode::from(1),
            Status::CountMismatch => ExitCode::from(2),
            Status::Failed => ExitCode::from(3),
        }
    }
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<Status> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "layername", &mut io::stdout());
        return Ok(Status::Done);
    }

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Export {
            document,
            output,
            line_ending,
        } => run_export(&config, &document, output, line_ending),
        Commands::Import {
            selection,
            names,
            output,
            dry_run,
        } => run_import(&config, selection, names, output.as_deref(), dry_run),
        Commands::Completions { .. } => Ok(Status::Done),
    }
}

fn prompt_for(path: Option<PathBuf>) -> Box<dyn PathPrompt> {
    match path {
        Some(path) => Box::new(FixedPath::new(path)),
        None => Box::new(TerminalPrompt::new()),
    }
}

fn run_export(
    config: &Config,
    document_path: &Path,
    output: Option<PathBuf>,
    line_ending: Option<LineEnding>,
) -> Result<Status> {
    let document = load_document(document_path)?;

    let mut options = ExportOptions::from_config(config);
    if let Some(line_ending) = line_ending {
        options.line_ending = line_ending;
    }

    let mut prompt = prompt_for(output);
    match Exporter::new(options).export(&document, prompt.as_mut())? {
        ExportOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(Status::Cancelled)
        }
        ExportOutcome::Written { path, .. } => {
            println!("Done! Layer names saved to:\n{}", path.display());
            Ok(Status::Done)
        }
    }
}

fn run_import(
    config: &Config,
    selection_path: PathBuf,
    names: Option<PathBuf>,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<Status> {
    let mut selection = SelectionFile::load(selection_path)?;
    let mut prompt = prompt_for(names);
    let importer = Importer::new();

    let outcome = if dry_run {
        importer.plan(prompt.as_mut(), selection.len())?
    } else {
        importer.import(prompt.as_mut(), &mut selection)?
    };

    match outcome {
        ImportOutcome::Cancelled(CancelReason::NoFileChosen) => {
            println!("No file selected.");
            Ok(Status::Cancelled)
        }
        ImportOutcome::Cancelled(CancelReason::Unreadable { path, reason }) => {
            println!("Could not open {}: {reason}", path.display());
            Ok(Status::Cancelled)
        }
        ImportOutcome::CountMismatch { selected, names } => {
            println!("Selected object count ({selected}) does not match name count ({names}).");
            Ok(Status::CountMismatch)
        }
        ImportOutcome::Planned { assignments } => {
            for (index, name) in assignments {
                let current = selection.objects()[index].name.as_str();
                println!("{current} -> {name}");
            }
            Ok(Status::Done)
        }
        ImportOutcome::Renamed { count } => {
            let written = selection.save(output, config.import.pretty())?;
            tracing::debug!(path = %written.display(), "selection written");
            println!("Renamed {count} objects from list.");
            Ok(Status::Done)
        }
    }
}

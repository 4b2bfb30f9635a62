use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Write a sample layer document and matching selection for manual runs
    Fixtures {
        #[arg(long, default_value = "target/fixtures")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Fixtures { dir } => write_fixtures(dir)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run").arg("--workspace");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn write_fixtures(dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let document = json!({
        "name": "poster.psd",
        "layers": [
            { "kind": "leaf", "name": "Title" },
            { "kind": "container", "name": "Artwork", "children": [
                { "kind": "leaf", "name": "Sky" },
                { "kind": "container", "name": "Ground", "children": [
                    { "kind": "leaf", "name": "Grass" },
                    { "kind": "leaf", "name": "Road" }
                ]}
            ]},
            { "kind": "leaf", "name": "Background" }
        ]
    });
    let selection: Vec<_> = (1..=5)
        .map(|id| json!({ "name": format!("Path {id}"), "id": id }))
        .collect();

    let document_path = dir.join("document.json");
    let selection_path = dir.join("selection.json");
    fs::write(&document_path, serde_json::to_string_pretty(&document)?)?;
    fs::write(&selection_path, serde_json::to_string_pretty(&selection)?)?;

    println!("wrote {}", document_path.display());
    println!("wrote {}", selection_path.display());
    Ok(())
}

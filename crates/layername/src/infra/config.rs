//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".layername/config.toml";

/// Layered configuration loaded from defaults, user, workspace, explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub export: Export,
    #[serde(default)]
    pub import: Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    #[serde(default)]
    line_ending: Option<String>,
    #[serde(default)]
    default_file_name: Option<String>,
}

impl Export {
    fn default_line_ending() -> &'static str {
        "native"
    }

    fn default_file_name_value() -> &'static str {
        "layer-names.txt"
    }

    pub fn line_ending(&self) -> String {
        self.line_ending
            .clone()
            .unwrap_or_else(|| Self::default_line_ending().to_owned())
    }

    pub fn default_file_name(&self) -> String {
        self.default_file_name
            .clone()
            .unwrap_or_else(|| Self::default_file_name_value().to_owned())
    }
}

impl Default for Export {
    fn default() -> Self {
        Self {
            line_ending: Some(Self::default_line_ending().to_owned()),
            default_file_name: Some(Self::default_file_name_value().to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    #[serde(default)]
    pretty: Option<bool>,
}

impl Import {
    fn default_pretty() -> bool {
        true
    }

    /// Whether rewritten selection files are pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or_else(Self::default_pretty)
    }
}

impl Default for Import {
    fn default() -> Self {
        Self {
            pretty: Some(Self::default_pretty()),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    line_ending: Option<String>,
    default_file_name: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            line_ending: env::var("LAYERNAME_LINE_ENDING").ok(),
            default_file_name: env::var("LAYERNAME_DEFAULT_FILE_NAME").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(line_ending: &str, default_file_name: &str) -> Self {
        Self {
            line_ending: Some(line_ending.to_owned()),
            default_file_name: Some(default_file_name.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user config, workspace config, an optional explicit
    /// file, and env overrides, in increasing precedence.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.exists()
        {
            anyhow::bail!("config file not found: {}", path.display());
        }

        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, explicit.map(Path::to_path_buf), env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        for path in [global, workspace, explicit].into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config layer");
                layers.push(Self::from_file(&path)?);
            }
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data).with_context(|| format!("in config file {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            export: merge_export(self.export, other.export),
            import: merge_import(self.import, other.import),
        }
    }
}

fn merge_export(mut base: Export, overlay: Export) -> Export {
    if let Some(value) = overlay.line_ending {
        base.line_ending = Some(value);
    }
    if let Some(value) = overlay.default_file_name {
        base.default_file_name = Some(value);
    }
    base
}

fn merge_import(mut base: Import, overlay: Import) -> Import {
    if let Some(value) = overlay.pretty {
        base.pretty = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("layername/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(line_ending) = env.line_ending {
        config.export.line_ending = Some(line_ending);
    }
    if let Some(default_file_name) = env.default_file_name {
        config.export.default_file_name = Some(default_file_name);
    }
    config
}

//! Configuration file (inlay.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inlay_build::{archive, optimizer, BuildConfig, ToolCommand};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
    optimizer: Option<ToolConfig>,
    archiver: Option<ToolConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsConfig {
    #[serde(default = "default_script")]
    script: PathBuf,
    #[serde(default = "default_template")]
    template: PathBuf,
    #[serde(default = "default_output")]
    output: PathBuf,
    #[serde(default = "default_archive")]
    archive: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            script: default_script(),
            template: default_template(),
            output: default_output(),
            archive: default_archive(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolConfig {
    program: String,
    #[serde(default)]
    args: Vec<String>,
}

impl From<ToolConfig> for ToolCommand {
    fn from(tool: ToolConfig) -> Self {
        ToolCommand::new(tool.program, tool.args)
    }
}

fn default_script() -> PathBuf {
    PathBuf::from("main.js")
}
fn default_template() -> PathBuf {
    PathBuf::from("index.html")
}
fn default_output() -> PathBuf {
    PathBuf::from("compiled/index.html")
}
fn default_archive() -> PathBuf {
    PathBuf::from("compiled.zip")
}

impl ConfigFile {
    /// Parse a config file from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve into a build configuration, filling in tool defaults.
    pub fn into_build_config(self) -> BuildConfig {
        BuildConfig {
            script: self.paths.script,
            template: self.paths.template,
            output: self.paths.output,
            archive: self.paths.archive,
            optimizer: self
                .optimizer
                .map(Into::into)
                .unwrap_or_else(optimizer::default_command),
            archiver: self
                .archiver
                .map(Into::into)
                .unwrap_or_else(archive::default_command),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = ConfigFile::parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

//! Single build pass: read, optimize, inline, write, archive.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::archive::{self, Archiver};
use crate::optimizer::{self, Optimizer};
use crate::template;
use crate::tool::ToolCommand;

/// Configuration for a build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Script source file
    pub script: PathBuf,

    /// HTML template containing the script marker
    pub template: PathBuf,

    /// Output HTML file
    pub output: PathBuf,

    /// Zip archive the output is added to
    pub archive: PathBuf,

    /// Optimizing compiler (stdin -> stdout)
    pub optimizer: ToolCommand,

    /// Archiver, called as `<archiver> <archive> <output>`
    pub archiver: ToolCommand,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("main.js"),
            template: PathBuf::from("index.html"),
            output: PathBuf::from("compiled/index.html"),
            archive: PathBuf::from("compiled.zip"),
            optimizer: optimizer::default_command(),
            archiver: archive::default_command(),
        }
    }
}

/// Sizes and timing of a completed build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Length of the script source in bytes
    pub source_bytes: usize,

    /// Length of the optimized script in bytes
    pub optimized_bytes: usize,

    /// Length of the written HTML in bytes
    pub html_bytes: usize,

    /// Size of the archive after the build, if the archiver produced one
    pub archive_bytes: Option<u64>,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to launch {tool}: {message}")]
    SpawnError { tool: String, message: String },

    #[error("Failed to write source to {tool}: {message}")]
    StdinError { tool: String, message: String },

    #[error("{tool} failed with {status}")]
    ToolFailed { tool: String, status: String },

    #[error("Template {path} does not contain {marker}")]
    MarkerNotFound { path: String, marker: String },

    #[error("Optimizer output is not valid UTF-8: {0}")]
    EncodingError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Builds the inlined page and archives it.
pub struct InlineBuilder {
    config: BuildConfig,
    optimizer: Optimizer,
    archiver: Archiver,
}

impl InlineBuilder {
    /// Create a new builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            optimizer: Optimizer::new(config.optimizer.clone()),
            archiver: Archiver::new(config.archiver.clone()),
            config,
        }
    }

    /// The configuration this builder runs with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run one build pass.
    ///
    /// Inputs are read fresh on every call. Nothing is written unless the
    /// optimizer succeeds and the template contains the script marker.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let source = read_source(&self.config.script)?;
        tracing::info!("{} length: {}", self.config.script.display(), source.len());

        let optimized = self.optimizer.optimize(&source).await?;
        tracing::info!("Optimized length: {}", optimized.code.len());

        let template = read_source(&self.config.template)?;
        let html = template::inject(&template, &optimized.code).into_html(&self.config.template)?;
        tracing::info!("With HTML: {}", html.len());

        write_output(&self.config.output, &html)?;

        self.archiver
            .append(&self.config.archive, &self.config.output)
            .await?;

        let archive_bytes = fs::metadata(&self.config.archive).ok().map(|m| m.len());
        match archive_bytes {
            Some(size) => tracing::info!("Final size: {}", size),
            None => tracing::warn!("Archive not found: {}", self.config.archive.display()),
        }

        Ok(BuildResult {
            source_bytes: source.len(),
            optimized_bytes: optimized.code.len(),
            html_bytes: html.len(),
            archive_bytes,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Read a text input file.
pub fn read_source(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|e| BuildError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write the output file, replacing any previous content.
fn write_output(path: &Path, html: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
    }

    fs::write(path, html)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

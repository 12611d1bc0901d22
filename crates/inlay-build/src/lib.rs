//! Build pipeline for inlay.
//!
//! Runs a script through an external optimizing compiler, inlines the result
//! into an HTML template, writes the page and adds it to a zip archive.

pub mod archive;
pub mod builder;
pub mod driver;
pub mod optimizer;
pub mod template;
pub mod tool;

pub use archive::Archiver;
pub use builder::{BuildConfig, BuildError, BuildResult, InlineBuilder};
pub use driver::{run, run_with, RunMode};
pub use optimizer::{Optimized, Optimizer};
pub use template::{inject, Injection, SCRIPT_MARKER};
pub use tool::ToolCommand;

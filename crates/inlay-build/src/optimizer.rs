//! Script optimization through an external compiler.

use std::io::ErrorKind;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;

use crate::builder::BuildError;
use crate::tool::ToolCommand;

/// Output of a successful optimizer run.
#[derive(Debug, Clone)]
pub struct Optimized {
    /// Optimized script text (the tool's stdout)
    pub code: String,

    /// Anything the tool printed on stderr, if non-empty
    pub diagnostics: Option<String>,
}

/// Runs an external optimizing compiler over script source.
///
/// The source is written to the tool's stdin and the optimized script is read
/// back from its stdout.
#[derive(Debug, Clone)]
pub struct Optimizer {
    command: ToolCommand,
}

impl Optimizer {
    /// Create an optimizer for the given tool.
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    /// Optimize `source`.
    ///
    /// Stderr output is logged but not fatal. A non-zero exit status is.
    pub async fn optimize(&self, source: &str) -> Result<Optimized, BuildError> {
        tracing::debug!("Running optimizer: {}", self.command);

        let mut child = self
            .command
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.command.spawn_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.command.spawn_error(std::io::Error::other("stdin not piped")))?;

        // Feed stdin while draining stdout/stderr so neither side blocks on a full pipe.
        let feed = async move {
            let written = stdin.write_all(source.as_bytes()).await;
            drop(stdin);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|e| self.command.spawn_error(e))?;

        let diagnostics = if output.stderr.is_empty() {
            None
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!("{} stderr: {}", self.command.program, stderr.trim_end());
            Some(stderr)
        };

        self.command.check_status(output.status)?;

        // Only the exit status decides success; a tool may stop reading stdin early.
        match written {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("{} closed stdin early: {}", self.command.program, e);
            }
            Err(e) => {
                return Err(BuildError::StdinError {
                    tool: self.command.program.clone(),
                    message: e.to_string(),
                });
            }
        }

        let code = String::from_utf8(output.stdout)
            .map_err(|e| BuildError::EncodingError(e.to_string()))?;

        Ok(Optimized { code, diagnostics })
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(default_command())
    }
}

/// Closure Compiler with advanced optimizations, emitting ES2021.
pub fn default_command() -> ToolCommand {
    ToolCommand::new(
        "java",
        [
            "-jar",
            "closure-compiler.jar",
            "--compilation_level",
            "ADVANCED_OPTIMIZATIONS",
            "--language_out",
            "ECMASCRIPT_2021",
        ],
    )
}

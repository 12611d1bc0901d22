//! External tool invocation.

use std::fmt;
use std::process::ExitStatus;

use tokio::process::Command;

use crate::builder::BuildError;

/// An external program and its fixed arguments.
///
/// Arguments are passed to the program as-is; nothing is routed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name or path
    pub program: String,

    /// Arguments passed before any per-call arguments
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command from a program and its arguments.
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a tokio command with the fixed arguments applied.
    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    pub(crate) fn spawn_error(&self, err: std::io::Error) -> BuildError {
        BuildError::SpawnError {
            tool: self.program.clone(),
            message: err.to_string(),
        }
    }

    /// Map a finished process status to `Ok` or `BuildError::ToolFailed`.
    pub(crate) fn check_status(&self, status: ExitStatus) -> Result<(), BuildError> {
        if status.success() {
            Ok(())
        } else {
            Err(BuildError::ToolFailed {
                tool: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

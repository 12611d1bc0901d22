//! Archiving the built page with an external zip tool.

use std::path::Path;

use crate::builder::BuildError;
use crate::tool::ToolCommand;

/// Adds files to a zip archive using an external archiver.
///
/// The archive is appended to, never reset. Whether repeated runs add
/// duplicate entries is up to the archiver.
#[derive(Debug, Clone)]
pub struct Archiver {
    command: ToolCommand,
}

impl Archiver {
    /// Create an archiver for the given tool.
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    /// Run `<tool> <args...> <archive> <file>`, failing on a non-zero exit.
    pub async fn append(&self, archive: &Path, file: &Path) -> Result<(), BuildError> {
        tracing::debug!(
            "Running archiver: {} {} {}",
            self.command,
            archive.display(),
            file.display()
        );

        let status = self
            .command
            .command()
            .arg(archive)
            .arg(file)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| self.command.spawn_error(e))?;

        self.command.check_status(status)
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new(default_command())
    }
}

/// `advzip -4 -a`: add with maximum (insane) compression.
pub fn default_command() -> ToolCommand {
    ToolCommand::new("advzip", ["-4", "-a"])
}

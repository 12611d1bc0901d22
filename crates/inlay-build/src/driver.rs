//! Build loop: run once, or keep rebuilding in watch mode.

use crate::builder::{BuildError, BuildResult, InlineBuilder};

/// How many times the build runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// A single build, then exit.
    Once,
    /// Rebuild back to back until the process is stopped.
    Watch,
}

impl RunMode {
    pub fn from_watch_flag(watch: bool) -> Self {
        if watch {
            RunMode::Watch
        } else {
            RunMode::Once
        }
    }
}

/// Loop progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// No build has completed yet.
    Pending,
    /// At least one build has completed.
    Steady,
}

/// Run the build loop, returning the number of completed builds.
///
/// In watch mode this only returns on error.
pub async fn run(builder: &InlineBuilder, mode: RunMode) -> Result<u64, BuildError> {
    run_with(builder, mode, |_| {}).await
}

/// Like [`run`], calling `on_build` after every completed build.
///
/// There is no delay between watch iterations and no change detection:
/// every pass redoes all the work. Dropping the future stops the loop.
pub async fn run_with<F>(
    builder: &InlineBuilder,
    mode: RunMode,
    mut on_build: F,
) -> Result<u64, BuildError>
where
    F: FnMut(&BuildResult),
{
    let mut state = LoopState::Pending;
    let mut builds = 0u64;

    while mode == RunMode::Watch || state == LoopState::Pending {
        tracing::info!("{}", "=".repeat(40));

        let result = builder.build().await?;
        builds += 1;

        tracing::debug!("Build {} finished in {}ms", builds, result.duration_ms);
        on_build(&result);

        state = LoopState::Steady;
    }

    Ok(builds)
}

//! inlay CLI - optimize a script, inline it into a page and zip the result.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use inlay_build::{InlineBuilder, RunMode};
use tracing_subscriber::{fmt, EnvFilter};

mod config;

#[derive(Parser)]
#[command(name = "inlay")]
#[command(about = "Optimize a script, inline it into an HTML page and zip the result")]
#[command(version)]
pub struct Cli {
    /// Rebuild continuously until interrupted
    #[arg(long)]
    watch: bool,

    /// Path to inlay.toml config file
    #[arg(short, long, default_value = "inlay.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let build_config = config::load(&cli.config)?.into_build_config();
    let builder = InlineBuilder::new(build_config);
    let mode = RunMode::from_watch_flag(cli.watch);

    if mode == RunMode::Watch {
        tracing::info!("Watch mode: rebuilding until interrupted");
    }

    inlay_build::run(&builder, mode).await?;

    tracing::info!("Output: {}", builder.config().output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_flag_is_accepted_anywhere() {
        let cli = Cli::try_parse_from(["inlay", "-v", "--watch"]).unwrap();
        assert!(cli.watch);
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["inlay", "--watch", "--config", "game.toml"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.config, PathBuf::from("game.toml"));
    }

    #[test]
    fn runs_once_by_default() {
        let cli = Cli::try_parse_from(["inlay"]).unwrap();
        assert!(!cli.watch);
        assert_eq!(cli.config, PathBuf::from("inlay.toml"));
    }

    #[test]
    fn rejects_subcommands() {
        assert!(Cli::try_parse_from(["inlay", "build"]).is_err());
    }
}

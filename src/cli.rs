//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Devfile - Inspect and edit devfile development environments
#[derive(Parser, Debug)]
#[command(name = "devfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a devfile
    Validate(commands::validate::ValidateArgs),

    /// Show schema version, variables and container components of a devfile
    Info(commands::info::InfoArgs),

    /// List components, commands, projects, starter projects or events
    Ls(commands::ls::LsArgs),

    /// Add or remove container volume mounts
    Mount(commands::mount::MountArgs),

    /// List or set top-level variables
    Vars(commands::vars::VarsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Info(args) => commands::info::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Mount(args) => commands::mount::execute(args, &self.color),
            Commands::Vars(args) => commands::vars::execute(args, &self.color),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed (e.g. by tests).
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "devfile",
            "ls",
            "components",
            "--kind",
            "container",
            "--color",
            "never",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.color, "never");
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Ls(_)));
    }

    #[test]
    fn test_mount_add_requires_a_mount() {
        assert!(Cli::try_parse_from(["devfile", "mount", "add", "runtime"]).is_err());
    }
}

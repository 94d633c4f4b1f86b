//! # Vars Command Implementation
//!
//! This module implements the `vars` subcommand for top-level variables,
//! available from schema version 2.1.0 on.
//!
//! ## Subcommands
//!
//! - **`list`**: Print every variable as `KEY=VALUE`
//! - **`set`**: Add or overwrite variables and write the devfile back

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use devfile::defaults::DEFAULT_DEVFILE_FILENAME;
use devfile::devfile::{DevfileData, DevfileV2};
use devfile::error::Error;
use devfile::model::Variables;
use devfile::output::{emoji, OutputConfig};
use devfile::suggestions;

use crate::commands::{load, parse_assignment, save};

/// Manage top-level variables
#[derive(Args, Debug)]
pub struct VarsArgs {
    /// Path to the devfile.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEVFILE_PATH",
        default_value = DEFAULT_DEVFILE_FILENAME
    )]
    pub file: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: VarsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VarsSubcommand {
    /// List top-level variables
    List,
    /// Set top-level variables
    Set(SetArgs),
}

/// Arguments for the vars set command
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Assignments as KEY=VALUE
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Execute the `vars` command.
pub fn execute(args: VarsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut doc = load(&args.file)?;

    match args.command {
        VarsSubcommand::List => {
            for (key, value) in gated(&doc, doc.get_top_level_variables())? {
                println!("{}={}", key, value);
            }
        }
        VarsSubcommand::Set(set) => {
            let variables = set
                .assignments
                .iter()
                .map(|arg| parse_assignment(arg))
                .collect::<Result<Variables>>()?;
            let count = variables.len();
            let result = doc.update_top_level_variables(variables);
            gated(&doc, result)?;
            save(&doc, &args.file)
                .with_context(|| format!("Failed to write {}", args.file.display()))?;
            println!(
                "{} Set {} variable(s) in {}",
                emoji(&out, "✅", "[OK]"),
                count,
                args.file.display()
            );
        }
    }
    Ok(())
}

/// Turn the schema gate into a hinted CLI error.
fn gated<T>(doc: &DevfileV2, result: devfile::error::Result<T>) -> Result<T> {
    match result {
        Err(Error::UnsupportedBySchemaVersion { .. }) => Err(suggestions::variables_unsupported(
            doc.get_schema_version(),
        )),
        other => Ok(other?),
    }
}

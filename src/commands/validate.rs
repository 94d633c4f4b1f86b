//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a devfile
//! without modifying it.
//!
//! ## Functionality
//!
//! - **Parsing**: Decodes the file and resolves every component, command and
//!   project source union.
//! - **Variable Substitution**: Replaces `{{name}}` references with top-level
//!   variables and reports undeclared ones as warnings.
//! - **Cross-Reference Validation**: Checks volume mounts, command targets,
//!   composite commands, events and default command groups.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use devfile::defaults::DEFAULT_DEVFILE_FILENAME;
use devfile::devfile::DevfileData;
use devfile::error::Error;
use devfile::filter::DevfileOptions;
use devfile::output::{emoji, OutputConfig};
use devfile::{validation, variables};

use crate::commands::load;

/// Validate a devfile
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the devfile to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEVFILE_PATH",
        default_value = DEFAULT_DEVFILE_FILENAME
    )]
    pub file: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let path = &args.file;
    println!(
        "{} Validating devfile: {}",
        emoji(&out, "🔍", "[SCAN]"),
        path.display()
    );

    let mut doc = match load(path) {
        Ok(doc) => {
            println!("{} Devfile parsed successfully", emoji(&out, "✅", "[OK]"));
            doc
        }
        Err(e) => {
            println!("{} Devfile parsing failed: {:#}", emoji(&out, "❌", "[ERR]"), e);
            return Err(e);
        }
    };

    let mut has_warnings = false;
    let mut has_errors = false;

    let options = DevfileOptions::all();
    println!("\n{} Devfile Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Schema version: {}", doc.get_schema_version());
    println!("   Components: {}", doc.get_components(&options)?.len());
    println!("   Commands: {}", doc.get_commands(&options)?.len());
    println!("   Projects: {}", doc.get_projects(&options)?.len());
    println!(
        "   Starter projects: {}",
        doc.get_starter_projects(&options)?.len()
    );

    println!(
        "\n{} Checking top-level variables...",
        emoji(&out, "🔄", "[CHECK]")
    );
    let warning = variables::validate_and_replace(&mut doc)?;
    if warning.is_empty() {
        println!(
            "{} All variable references are declared",
            emoji(&out, "✅", "[OK]")
        );
    } else {
        has_warnings = true;
        for (kind, entries) in warning.groups() {
            for (name, keys) in entries {
                println!(
                    "{} {} {} references undeclared variables: {}",
                    emoji(&out, "⚠️", "[WARN]"),
                    kind,
                    name,
                    keys.join(", ")
                );
            }
        }
    }

    println!(
        "\n{} Validating cross references...",
        emoji(&out, "🔍", "[SCAN]")
    );
    match validation::validate_devfile_data(&doc) {
        Ok(()) => println!("{} All references are valid", emoji(&out, "✅", "[OK]")),
        Err(Error::Validation { problems }) => {
            has_errors = true;
            for problem in problems {
                println!("{} {}", emoji(&out, "❌", "[ERR]"), problem);
            }
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if has_errors {
        println!(
            "{} Devfile has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Devfile validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Devfile has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Devfile validation failed in strict mode"));
    }

    if has_warnings {
        println!(
            "{} Devfile is valid but has warnings",
            emoji(&out, "⚠️", "[WARN]")
        );
    } else {
        println!("{} Devfile is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}

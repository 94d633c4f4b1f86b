//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which parses and validates a
//! devfile and then summarizes it.
//!
//! ## Functionality
//!
//! - **Document Overview**: Schema version and metadata
//! - **Top-Level Variables**: Declared variable keys, or why the schema has none
//! - **Container Components**: Name, image and memory limit of each container
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use devfile::defaults::DEFAULT_DEVFILE_FILENAME;
use devfile::devfile::{DevfileData, DevfileV2};
use devfile::filter::DevfileOptions;
use devfile::parser;
use devfile::suggestions;

/// Show information about a devfile
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the devfile.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEVFILE_PATH",
        default_value = DEFAULT_DEVFILE_FILENAME
    )]
    pub file: PathBuf,
}

/// One container component as shown by `info`
#[derive(Debug, PartialEq)]
struct ContainerSummary {
    name: String,
    image: String,
    memory_limit: Option<String>,
}

/// Execute the `info` command.
pub fn execute(args: InfoArgs) -> Result<()> {
    let path = &args.file;
    if !path.exists() {
        return Err(suggestions::devfile_not_found(path));
    }
    println!("📋 Devfile: {}", path.display());

    let (doc, warning) = parser::parse_file_and_validate(path)
        .with_context(|| format!("Failed to load devfile from {}", path.display()))?;
    warning.log();

    println!("\nSchema version: {}", doc.get_schema_version());
    let metadata = doc.get_metadata();
    if !metadata.is_empty() {
        println!("Name: {}", metadata.name);
        if let Some(version) = &metadata.version {
            println!("Version: {}", version);
        }
    }

    match variable_keys(&doc) {
        Ok(keys) if keys.is_empty() => println!("\nTop-level variables: (none)"),
        Ok(keys) => println!("\nTop-level variables: {}", keys.join(" ")),
        Err(e) => println!("\nTop-level variables: {}", e),
    }

    let containers = container_summaries(&doc)?;
    println!("\nContainer components: {}", containers.len());
    for container in &containers {
        println!("  {}", container.name);
        println!("    image: {}", container.image);
        println!(
            "    memory limit: {}",
            container.memory_limit.as_deref().unwrap_or("(unset)")
        );
    }

    Ok(())
}

fn variable_keys(doc: &DevfileV2) -> devfile::error::Result<Vec<String>> {
    Ok(doc.get_top_level_variables()?.keys().cloned().collect())
}

fn container_summaries(doc: &DevfileV2) -> Result<Vec<ContainerSummary>> {
    let components = doc.get_devfile_container_components(&DevfileOptions::all())?;
    Ok(components
        .iter()
        .filter_map(|component| {
            component.as_container().map(|container| ContainerSummary {
                name: component.name.clone(),
                image: container.image.clone(),
                memory_limit: container.memory_limit.clone(),
            })
        })
        .collect())
}

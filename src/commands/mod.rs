//! # CLI Subcommands
//!
//! One module per `devfile` subcommand. Each exposes an `Args` struct for
//! `clap` and an `execute` function taking the parsed args and the global
//! `--color` flag.
//!
//! - `validate`: parse, substitute variables and check cross references.
//! - `info`: summarize a devfile.
//! - `ls`: list one collection with filters.
//! - `mount`: add or remove container volume mounts and write the file back.
//! - `vars`: set top-level variables and write the file back.

pub mod info;
pub mod ls;
pub mod mount;
pub mod validate;
pub mod vars;

use anyhow::{Context, Result};
use std::path::Path;

use devfile::devfile::DevfileV2;
use devfile::{parser, suggestions, writer};

/// Load the devfile at `path`, with a hinted error when it does not exist.
pub(crate) fn load(path: &Path) -> Result<DevfileV2> {
    if !path.exists() {
        return Err(suggestions::devfile_not_found(path));
    }
    parser::parse_file(path).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the document back to `path`, as JSON when the file name ends in `.json`.
pub(crate) fn save(doc: &DevfileV2, path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        writer::write_json(doc, path)?;
    } else {
        writer::write_yaml(doc, path)?;
    }
    Ok(())
}

/// Split a `KEY=VALUE` argument. The value may itself contain `=`.
pub(crate) fn parse_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(suggestions::invalid_assignment(arg)),
    }
}

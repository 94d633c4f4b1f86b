//! # Mount Command Implementation
//!
//! This module implements the `mount` subcommand, which edits the volume
//! mounts of container components and writes the devfile back.
//!
//! ## Subcommands
//!
//! - **`add`**: Mount one or more volumes into a container component
//! - **`remove`**: Unmount a volume from every container component
//! - **`paths`**: Show where a volume is mounted in a container component

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use devfile::defaults::DEFAULT_DEVFILE_FILENAME;
use devfile::devfile::{DevfileData, DevfileV2};
use devfile::filter::DevfileOptions;
use devfile::model::VolumeMount;
use devfile::output::{emoji, OutputConfig};
use devfile::writer;

use crate::commands::{load, save};

/// Manage container volume mounts
#[derive(Args, Debug)]
pub struct MountArgs {
    /// Path to the devfile.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEVFILE_PATH",
        default_value = DEFAULT_DEVFILE_FILENAME
    )]
    pub file: PathBuf,

    /// Print the updated devfile instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: MountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MountSubcommand {
    /// Mount volumes into a container component
    Add(AddArgs),
    /// Remove every mount of a volume
    Remove(RemoveArgs),
    /// Show the mount paths of a volume in a container component
    Paths(PathsArgs),
}

/// Arguments for the mount add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the container component
    pub container: String,

    /// Mounts as VOLUME or VOLUME:PATH; without a path the volume is
    /// mounted at /VOLUME
    #[arg(required = true, value_name = "VOLUME[:PATH]")]
    pub mounts: Vec<String>,
}

/// Arguments for the mount remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the volume to unmount
    pub volume: String,
}

/// Arguments for the mount paths command
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Name of the volume
    pub volume: String,

    /// Name of the container component
    pub component: String,
}

/// Execute the `mount` command.
pub fn execute(args: MountArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut doc = load(&args.file)?;

    match args.command {
        MountSubcommand::Add(add) => {
            let mounts = add
                .mounts
                .iter()
                .map(|spec| parse_mount(spec))
                .collect::<Result<Vec<_>>>()?;
            add_mounts(&mut doc, &add.container, mounts)?;
            println!(
                "{} Mounted {} volume(s) into {}",
                emoji(&out, "✅", "[OK]"),
                add.mounts.len(),
                add.container
            );
        }
        MountSubcommand::Remove(remove) => {
            doc.delete_volume_mount(&remove.volume)?;
            println!(
                "{} Removed every mount of volume {}",
                emoji(&out, "✅", "[OK]"),
                remove.volume
            );
        }
        MountSubcommand::Paths(paths) => {
            for path in doc.get_volume_mount_paths(&paths.volume, &paths.component)? {
                println!("{}", path);
            }
            return Ok(());
        }
    }

    if args.dry_run {
        print!("{}", writer::to_yaml_string(&doc)?);
    } else {
        save(&doc, &args.file)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
    }
    Ok(())
}

/// Parse `VOLUME` or `VOLUME:PATH`.
fn parse_mount(spec: &str) -> Result<VolumeMount> {
    let (volume, path) = spec.split_once(':').unwrap_or((spec, ""));
    if volume.is_empty() {
        anyhow::bail!("Invalid mount '{}': expected VOLUME or VOLUME:PATH", spec);
    }
    Ok(VolumeMount::new(volume, path))
}

/// Mount volumes after checking that each one is a declared volume component.
fn add_mounts(doc: &mut DevfileV2, container: &str, mounts: Vec<VolumeMount>) -> Result<()> {
    let volumes = doc.get_devfile_volume_components(&DevfileOptions::all())?;
    for mount in &mounts {
        if !volumes.iter().any(|v| v.name == mount.name) {
            anyhow::bail!(
                "Volume component {} does not exist\n\n\
                 hint: Declare it under components with a `volume:` entry first",
                mount.name
            );
        }
    }
    doc.add_volume_mounts(container, mounts)?;
    Ok(())
}

//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists one collection of a
//! devfile: components, commands, projects, starter projects or events.
//!
//! ## Functionality
//!
//! - **Attribute Filtering**: `--filter KEY=VALUE` keeps entries whose
//!   attributes contain every given pair
//! - **Kind Filtering**: `--kind` narrows by component type, command type or
//!   group kind, or project source type
//! - **Pattern Filtering**: `--pattern` matches entry names against a glob
//! - **Detailed Output**: `--long` adds the kind and a one-line detail
//!
//! Top-level variables are substituted before listing. This command is a
//! safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use devfile::defaults::DEFAULT_DEVFILE_FILENAME;
use devfile::devfile::{DevfileData, DevfileV2};
use devfile::filter::DevfileOptions;
use devfile::model::{
    Attributes, Command, CommandGroupKind, CommandKind, Component, ComponentKind, ProjectSource,
};
use devfile::suggestions;
use devfile::variables;
use devfile::variant::{CommandType, ComponentType, ProjectSourceType};

use crate::commands::{load, parse_assignment};

/// List the entries of one devfile collection
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Collection to list.
    #[arg(value_enum)]
    pub target: Target,

    /// Path to the devfile.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEVFILE_PATH",
        default_value = DEFAULT_DEVFILE_FILENAME
    )]
    pub file: PathBuf,

    /// Keep entries whose attributes contain KEY=VALUE (repeatable).
    ///
    /// VALUE is read as JSON when it parses as JSON, as a string otherwise.
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Keep entries of this kind (e.g. "container", "exec", "build", "git").
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<String>,

    /// Filter entry names by glob pattern (e.g., "node-*").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Show the kind and a short description of each entry.
    #[arg(short, long)]
    pub long: bool,

    /// Show only the number of entries.
    #[arg(long)]
    pub count: bool,

    /// Reverse the listing order.
    #[arg(short, long)]
    pub reverse: bool,
}

/// Collections that `ls` can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Components,
    Commands,
    Projects,
    StarterProjects,
    Events,
}

impl Target {
    fn label(&self) -> &'static str {
        match self {
            Target::Components => "components",
            Target::Commands => "commands",
            Target::Projects => "projects",
            Target::StarterProjects => "starter projects",
            Target::Events => "events",
        }
    }
}

/// One listed entry
#[derive(Debug, PartialEq)]
struct Entry {
    name: String,
    kind: String,
    detail: String,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let mut doc = load(&args.file)?;
    variables::validate_and_replace(&mut doc)?;

    let options = build_options(args.target, &args.filters, args.kind.as_deref())?;
    let mut entries = collect(&doc, args.target, &options)?;

    if let Some(pattern) = &args.pattern {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| suggestions::invalid_glob(pattern, &e))?;
        entries.retain(|e| glob_pattern.matches(&e.name));
    }

    if args.reverse {
        entries.reverse();
    }

    if args.count {
        println!("{}", entries.len());
        return Ok(());
    }

    if entries.is_empty() {
        println!("No {} found.", args.target.label());
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        if args.long {
            println!(
                "{:<width$}  {:<10}  {}",
                entry.name,
                entry.kind,
                entry.detail,
                width = width
            );
        } else {
            println!("{}", entry.name);
        }
    }

    println!();
    println!("{} {}", entries.len(), args.target.label());

    Ok(())
}

fn build_options(target: Target, filters: &[String], kind: Option<&str>) -> Result<DevfileOptions> {
    let mut options = DevfileOptions::all();

    if !filters.is_empty() {
        if target == Target::Events {
            anyhow::bail!("--filter is not supported for events");
        }
        let mut attributes = Attributes::new();
        for filter in filters {
            let (key, value) = parse_assignment(filter)?;
            let value = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value));
            attributes.insert(key, value);
        }
        options = options.with_filter(attributes);
    }

    let Some(kind) = kind else {
        return Ok(options);
    };
    let options = match target {
        Target::Components => match ComponentType::from_str(kind) {
            Ok(t) => options.with_component_type(t),
            Err(_) => {
                let valid: Vec<&str> = ComponentType::ALL.iter().map(|t| t.as_str()).collect();
                return Err(suggestions::unknown_kind(kind, target.label(), &valid));
            }
        },
        Target::Commands => {
            if let Ok(t) = CommandType::from_str(kind) {
                options.with_command_type(t)
            } else if let Ok(group) = CommandGroupKind::from_str(kind) {
                options.with_command_group_kind(group)
            } else {
                let valid = [
                    "exec", "composite", "apply", "custom", "build", "run", "test", "debug",
                    "deploy",
                ];
                return Err(suggestions::unknown_kind(kind, target.label(), &valid));
            }
        }
        Target::Projects | Target::StarterProjects => match ProjectSourceType::from_str(kind) {
            Ok(t) => options.with_project_source_type(t),
            Err(_) => {
                let valid: Vec<&str> = ProjectSourceType::ALL.iter().map(|t| t.as_str()).collect();
                return Err(suggestions::unknown_kind(kind, target.label(), &valid));
            }
        },
        Target::Events => anyhow::bail!("--kind is not supported for events"),
    };
    Ok(options)
}

fn collect(doc: &DevfileV2, target: Target, options: &DevfileOptions) -> Result<Vec<Entry>> {
    let entries = match target {
        Target::Components => doc
            .get_components(options)?
            .iter()
            .map(component_entry)
            .collect(),
        Target::Commands => doc.get_commands(options)?.iter().map(command_entry).collect(),
        Target::Projects => doc
            .get_projects(options)?
            .into_iter()
            .map(|p| source_entry(p.name, p.source.as_ref()))
            .collect(),
        Target::StarterProjects => doc
            .get_starter_projects(options)?
            .into_iter()
            .map(|p| source_entry(p.name, p.source.as_ref()))
            .collect(),
        Target::Events => doc
            .get_events()
            .slots()
            .iter()
            .filter(|(_, commands)| !commands.is_empty())
            .map(|(slot, commands)| Entry {
                name: field_name(slot),
                kind: "event".to_string(),
                detail: commands.join(", "),
            })
            .collect(),
    };
    Ok(entries)
}

/// "post start" -> "postStart", the key used in the devfile.
fn field_name(slot: &str) -> String {
    let mut words = slot.split_whitespace();
    let mut name = words.next().unwrap_or_default().to_string();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn component_entry(component: &Component) -> Entry {
    let detail = match &component.kind {
        ComponentKind::Container(c) => match &c.memory_limit {
            Some(limit) => format!("{} (memory {})", c.image, limit),
            None => c.image.clone(),
        },
        ComponentKind::Volume(v) => v.size.clone().unwrap_or_default(),
        ComponentKind::Kubernetes(k) | ComponentKind::Openshift(k) => {
            k.uri.clone().unwrap_or_else(|| "(inlined)".to_string())
        }
        ComponentKind::Plugin(p) => p.id.clone().or_else(|| p.uri.clone()).unwrap_or_default(),
        ComponentKind::Custom(c) => c.component_class.clone(),
    };
    Entry {
        name: component.name.clone(),
        kind: component.component_type().to_string(),
        detail,
    }
}

fn command_entry(command: &Command) -> Entry {
    let mut detail = match &command.kind {
        CommandKind::Exec(exec) => format!("{} in {}", exec.command_line, exec.component),
        CommandKind::Composite(c) => c.commands.join(", "),
        CommandKind::Apply(apply) => apply.component.clone(),
        CommandKind::Custom(c) => c.command_class.clone(),
    };
    if let Some(group) = command.group() {
        let default = if group.is_default() { ", default" } else { "" };
        detail = format!("[{}{}] {}", group.kind, default, detail);
    }
    Entry {
        name: command.id.clone(),
        kind: command.command_type().to_string(),
        detail,
    }
}

fn source_entry(name: String, source: Option<&ProjectSource>) -> Entry {
    let (kind, detail) = match source {
        Some(ProjectSource::Git(git)) | Some(ProjectSource::Github(git)) => (
            source.map(|s| s.source_type().to_string()).unwrap_or_default(),
            git.remotes
                .iter()
                .map(|(remote, url)| format!("{}={}", remote, url))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Some(ProjectSource::Zip(zip)) => ("zip".to_string(), zip.location.clone()),
        Some(ProjectSource::Custom(c)) => ("custom".to_string(), c.project_source_class.clone()),
        None => ("-".to_string(), String::new()),
    };
    Entry { name, kind, detail }
}

//! # Semantic Validation
//!
//! Structural problems (unknown fields, wrong value types, malformed unions)
//! are rejected while the document is built. This module checks the
//! relationships between entities that only make sense once the whole
//! document is loaded:
//!
//! - components are unique per (name, kind) and command ids are unique after
//!   lower-casing,
//! - container images are not empty,
//! - every container volume mount names an existing volume component,
//! - exec commands run in an existing container component and apply commands
//!   name an existing component,
//! - composite commands only list existing commands, never themselves,
//! - event slots only list existing commands,
//! - each command group kind has at most one default command.
//!
//! All problems are collected and reported together in one
//! [`Error::Validation`].

use crate::devfile::DevfileData;
use crate::error::{Error, Result};
use crate::filter::DevfileOptions;
use crate::model::command::normalize_id;
use crate::model::{Command, CommandGroupKind, CommandKind, Component};
use std::collections::{BTreeMap, BTreeSet};

/// Validate the cross references of a document.
pub fn validate_devfile_data(data: &dyn DevfileData) -> Result<()> {
    let options = DevfileOptions::all();
    let components = data.get_components(&options)?;
    let commands = data.get_commands(&options)?;

    let mut problems = Vec::new();
    problems.extend(validate_components(&components));
    problems.extend(validate_commands(&commands, &components));
    problems.extend(validate_events(data, &commands));

    log::debug!("Devfile validation found {} problem(s)", problems.len());
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { problems })
    }
}

fn validate_components(components: &[Component]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = BTreeSet::new();
    let volumes: BTreeSet<&str> = components
        .iter()
        .filter(|c| c.is_volume())
        .map(|c| c.name.as_str())
        .collect();

    for component in components {
        if !seen.insert((component.name.as_str(), component.component_type())) {
            problems.push(format!(
                "{} component {} is defined more than once",
                component.component_type(),
                component.name
            ));
        }

        let Some(container) = component.as_container() else {
            continue;
        };
        if container.image.trim().is_empty() {
            problems.push(format!(
                "container component {} has an empty image",
                component.name
            ));
        }
        for mount in &container.volume_mounts {
            if !volumes.contains(mount.name.as_str()) {
                problems.push(format!(
                    "container component {} mounts volume {}, which is not a volume component",
                    component.name, mount.name
                ));
            }
        }
    }
    problems
}

fn validate_commands(commands: &[Command], components: &[Component]) -> Vec<String> {
    let mut problems = Vec::new();
    let ids: BTreeSet<String> = commands.iter().map(Command::normalized_id).collect();
    let mut seen = BTreeSet::new();
    let mut defaults: BTreeMap<CommandGroupKind, Vec<&str>> = BTreeMap::new();

    for command in commands {
        let id = command.normalized_id();
        if !seen.insert(id.clone()) {
            problems.push(format!("command {} is defined more than once", id));
        }

        match &command.kind {
            CommandKind::Exec(exec) => {
                let mut targets = components.iter().filter(|c| c.name == exec.component);
                match targets.next() {
                    None => problems.push(format!(
                        "exec command {} references unknown component {}",
                        command.id, exec.component
                    )),
                    Some(first) if !first.is_container() && !targets.any(Component::is_container) => {
                        problems.push(format!(
                            "exec command {} references component {}, which is not a container component",
                            command.id, exec.component
                        ))
                    }
                    Some(_) => {}
                }
            }
            CommandKind::Apply(apply) => {
                if !components.iter().any(|c| c.name == apply.component) {
                    problems.push(format!(
                        "apply command {} references unknown component {}",
                        command.id, apply.component
                    ));
                }
            }
            CommandKind::Composite(composite) => {
                for child in &composite.commands {
                    let child_id = normalize_id(child);
                    if child_id == id {
                        problems.push(format!(
                            "composite command {} references itself",
                            command.id
                        ));
                    } else if !ids.contains(&child_id) {
                        problems.push(format!(
                            "composite command {} references unknown command {}",
                            command.id, child
                        ));
                    }
                }
            }
            CommandKind::Custom(_) => {}
        }

        if let Some(group) = command.group().filter(|g| g.is_default()) {
            defaults.entry(group.kind).or_default().push(&command.id);
        }
    }

    for (kind, ids) in defaults {
        if ids.len() > 1 {
            problems.push(format!(
                "command group {} has more than one default command: {}",
                kind,
                ids.join(", ")
            ));
        }
    }
    problems
}

fn validate_events(data: &dyn DevfileData, commands: &[Command]) -> Vec<String> {
    let ids: BTreeSet<String> = commands.iter().map(Command::normalized_id).collect();
    let events = data.get_events();
    let mut problems = Vec::new();
    for (slot, entries) in events.slots() {
        for entry in entries {
            if !ids.contains(&normalize_id(entry)) {
                problems.push(format!(
                    "{} event references unknown command {}",
                    slot, entry
                ));
            }
        }
    }
    problems
}

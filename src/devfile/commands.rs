//! Command collection
//!
//! Command ids are case-insensitive. They are lower-cased when a command is
//! added or updated, and every lookup compares lower-cased ids.

use super::WorkspaceContent;
use crate::error::{Error, Result};
use crate::filter::{matches_command, DevfileOptions};
use crate::model::command::normalize_id;
use crate::model::Command;
use log::debug;
use std::collections::BTreeMap;

pub(super) fn get(content: &WorkspaceContent, options: &DevfileOptions) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for command in &content.commands {
        if matches_command(command, options)? {
            commands.push(command.clone());
        }
    }
    Ok(commands)
}

pub(super) fn command_map(content: &WorkspaceContent) -> BTreeMap<String, Command> {
    content
        .commands
        .iter()
        .map(|command| (command.normalized_id(), command.clone()))
        .collect()
}

fn normalized(mut command: Command) -> Command {
    command.id = normalize_id(&command.id);
    command
}

pub(super) fn add(content: &mut WorkspaceContent, commands: Vec<Command>) -> Result<()> {
    for command in commands.into_iter().map(normalized) {
        if content
            .commands
            .iter()
            .any(|c| c.normalized_id() == command.id)
        {
            return Err(Error::already_exists(command.id, "command"));
        }
        content.commands.push(command);
    }
    Ok(())
}

pub(super) fn update(content: &mut WorkspaceContent, command: Command) {
    let command = normalized(command);
    match content
        .commands
        .iter_mut()
        .find(|c| c.normalized_id() == command.id)
    {
        Some(existing) => *existing = command,
        None => debug!("update skipped: no command with id {}", command.id),
    }
}

pub(super) fn delete(content: &mut WorkspaceContent, id: &str) -> Result<()> {
    let id = normalize_id(id);
    let before = content.commands.len();
    content.commands.retain(|c| c.normalized_id() != id);
    if content.commands.len() == before {
        return Err(Error::not_found(id, "command"));
    }
    Ok(())
}

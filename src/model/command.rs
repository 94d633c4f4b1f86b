//! Command definitions

use super::{Attributes, EnvVar};
use crate::variant::CommandType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action defined in the devfile.
///
/// Ids are compared after lower-casing; see [`Command::normalized_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: String,
    pub attributes: Attributes,
    pub kind: CommandKind,
}

/// The populated member of the command union.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Exec(ExecCommand),
    Composite(CompositeCommand),
    Apply(ApplyCommand),
    Custom(CustomCommand),
}

impl CommandKind {
    pub fn command_type(&self) -> CommandType {
        match self {
            CommandKind::Exec(_) => CommandType::Exec,
            CommandKind::Composite(_) => CommandType::Composite,
            CommandKind::Apply(_) => CommandType::Apply,
            CommandKind::Custom(_) => CommandType::Custom,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.command_type(), f)
    }
}

impl Command {
    pub fn new(id: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
            kind,
        }
    }

    /// Create an exec command
    pub fn exec(id: impl Into<String>, exec: ExecCommand) -> Self {
        Self::new(id, CommandKind::Exec(exec))
    }

    /// Create a composite command
    pub fn composite(id: impl Into<String>, composite: CompositeCommand) -> Self {
        Self::new(id, CommandKind::Composite(composite))
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The id used for lookup and duplicate detection.
    pub fn normalized_id(&self) -> String {
        normalize_id(&self.id)
    }

    pub fn command_type(&self) -> CommandType {
        self.kind.command_type()
    }

    /// The group of the command, whatever its kind.
    pub fn group(&self) -> Option<&CommandGroup> {
        match &self.kind {
            CommandKind::Exec(exec) => exec.group.as_ref(),
            CommandKind::Composite(composite) => composite.group.as_ref(),
            CommandKind::Apply(apply) => apply.group.as_ref(),
            CommandKind::Custom(custom) => custom.group.as_ref(),
        }
    }

    fn group_mut(&mut self) -> &mut Option<CommandGroup> {
        match &mut self.kind {
            CommandKind::Exec(exec) => &mut exec.group,
            CommandKind::Composite(composite) => &mut composite.group,
            CommandKind::Apply(apply) => &mut apply.group,
            CommandKind::Custom(custom) => &mut custom.group,
        }
    }

    pub fn with_group(mut self, kind: CommandGroupKind, is_default: bool) -> Self {
        *self.group_mut() = Some(CommandGroup {
            kind,
            is_default: Some(is_default),
        });
        self
    }

    /// Component an exec command runs in.
    pub fn exec_component(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Exec(exec) => Some(exec.component.as_str()),
            _ => None,
        }
    }

    pub fn exec_command_line(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Exec(exec) => Some(exec.command_line.as_str()),
            _ => None,
        }
    }

    pub fn exec_working_dir(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Exec(exec) => exec.working_dir.as_deref(),
            _ => None,
        }
    }
}

pub(crate) fn normalize_id(id: &str) -> String {
    id.to_lowercase()
}

/// Command group classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandGroup {
    pub kind: CommandGroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl CommandGroup {
    pub fn is_default(&self) -> bool {
        self.is_default.unwrap_or(false)
    }
}

/// Kind of a command group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandGroupKind {
    Build,
    Run,
    Test,
    Debug,
    Deploy,
}

impl CommandGroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandGroupKind::Build => "build",
            CommandGroupKind::Run => "run",
            CommandGroupKind::Test => "test",
            CommandGroupKind::Debug => "debug",
            CommandGroupKind::Deploy => "deploy",
        }
    }
}

impl fmt::Display for CommandGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandGroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" => Ok(CommandGroupKind::Build),
            "run" => Ok(CommandGroupKind::Run),
            "test" => Ok(CommandGroupKind::Test),
            "debug" => Ok(CommandGroupKind::Debug),
            "deploy" => Ok(CommandGroupKind::Deploy),
            other => Err(format!("unknown command group kind: {}", other)),
        }
    }
}

/// Command executed in a container component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub command_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_reload_capable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

impl ExecCommand {
    pub fn new(component: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            command_line: command_line.into(),
            ..Self::default()
        }
    }
}

/// Command made of other commands, run in sequence or in parallel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

/// Command that applies a component (e.g. a Kubernetes resource)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

/// Tool-specific command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub command_class: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub embedded_resource: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

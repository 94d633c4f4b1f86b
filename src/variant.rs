//! # Variant Resolution
//!
//! Type tags for the three unions of the devfile format and the resolver that
//! picks the single populated member of a raw union.
//!
//! The typed model never needs resolving at runtime: `ComponentKind`,
//! `CommandKind` and `ProjectSource` are closed enums and always know their
//! tag. Resolution only happens at the boundary, when a [`crate::raw`] value
//! with several optional members is turned into a typed one.

use crate::error::{Error, Result};
use crate::raw::{RawCommand, RawComponent, RawProjectSource};
use std::fmt;
use std::str::FromStr;

/// Discriminant of the component union
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentType {
    Container,
    Volume,
    Kubernetes,
    Openshift,
    Plugin,
    Custom,
}

impl ComponentType {
    pub const ALL: [ComponentType; 6] = [
        ComponentType::Container,
        ComponentType::Volume,
        ComponentType::Kubernetes,
        ComponentType::Openshift,
        ComponentType::Plugin,
        ComponentType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Container => "container",
            ComponentType::Volume => "volume",
            ComponentType::Kubernetes => "kubernetes",
            ComponentType::Openshift => "openshift",
            ComponentType::Plugin => "plugin",
            ComponentType::Custom => "custom",
        }
    }
}

/// Discriminant of the command union
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandType {
    Exec,
    Composite,
    Apply,
    Custom,
}

impl CommandType {
    pub const ALL: [CommandType; 4] = [
        CommandType::Exec,
        CommandType::Composite,
        CommandType::Apply,
        CommandType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Exec => "exec",
            CommandType::Composite => "composite",
            CommandType::Apply => "apply",
            CommandType::Custom => "custom",
        }
    }
}

/// Discriminant of the project source union
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectSourceType {
    Git,
    Github,
    Zip,
    Custom,
}

impl ProjectSourceType {
    pub const ALL: [ProjectSourceType; 4] = [
        ProjectSourceType::Git,
        ProjectSourceType::Github,
        ProjectSourceType::Zip,
        ProjectSourceType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectSourceType::Git => "git",
            ProjectSourceType::Github => "github",
            ProjectSourceType::Zip => "zip",
            ProjectSourceType::Custom => "custom",
        }
    }
}

macro_rules! impl_tag_traits {
    ($tag:ty, $entity:literal) => {
        impl fmt::Display for $tag {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $tag {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = s.to_lowercase();
                <$tag>::ALL
                    .into_iter()
                    .find(|tag| tag.as_str() == wanted)
                    .ok_or_else(|| {
                        let known: Vec<&str> = <$tag>::ALL.iter().map(|t| t.as_str()).collect();
                        format!(
                            "unknown {} type: {} (expected one of: {})",
                            $entity,
                            s,
                            known.join(", ")
                        )
                    })
            }
        }
    };
}

impl_tag_traits!(ComponentType, "component");
impl_tag_traits!(CommandType, "command");
impl_tag_traits!(ProjectSourceType, "project source");

/// Returns the single member of `populated`.
///
/// Fails with `UnknownVariant` when nothing is populated and with
/// `MultipleVariants` when more than one member is.
pub(crate) fn exactly_one<T: fmt::Display>(
    entity: &str,
    name: &str,
    mut populated: Vec<T>,
) -> Result<T> {
    match populated.len() {
        1 => Ok(populated.remove(0)),
        0 => Err(Error::UnknownVariant {
            entity: entity.to_string(),
            name: name.to_string(),
        }),
        _ => Err(Error::MultipleVariants {
            entity: entity.to_string(),
            name: name.to_string(),
            members: populated.iter().map(ToString::to_string).collect(),
        }),
    }
}

/// Resolve the kind of a raw component.
pub fn component_type(raw: &RawComponent) -> Result<ComponentType> {
    exactly_one("component", &raw.name, raw.populated())
}

/// Resolve the kind of a raw command.
pub fn command_type(raw: &RawCommand) -> Result<CommandType> {
    exactly_one("command", &raw.id, raw.populated())
}

/// Resolve the kind of a raw project source. `project` names the owning
/// project in errors.
pub fn project_source_type(project: &str, raw: &RawProjectSource) -> Result<ProjectSourceType> {
    exactly_one("project source", project, raw.populated())
}

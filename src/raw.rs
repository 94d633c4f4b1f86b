//! # Raw Document Shapes
//!
//! The serde-facing form of a devfile. Unions are written the way the devfile
//! format writes them, as a set of optional sibling fields of which exactly
//! one should be present:
//!
//! ```yaml
//! components:
//!   - name: runtime
//!     container:
//!       image: registry.access.redhat.com/ubi8/nodejs-16
//! ```
//!
//! The raw structs are what `serde_yaml` reads and writes. Conversion to the
//! typed model ([`crate::model`]) goes through the variant resolver, which
//! rejects unions with zero or several populated members; conversion back is
//! infallible.

use crate::error::{Error, Result};
use crate::model::{
    ApplyCommand, Attributes, Command, CommandKind, Component, ComponentKind, CompositeCommand,
    Container, CustomCommand, CustomComponent, CustomProjectSource, Events, ExecCommand,
    GitLikeProjectSource, KubernetesLike, Metadata, Parent, PluginComponent, Project,
    ProjectSource, StarterProject, Variables, Volume, ZipProjectSource,
};
use crate::variant::{self, ComponentType, CommandType, ProjectSourceType};
use serde::{Deserialize, Serialize};

/// The whole document as it appears on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<RawProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starter_projects: Vec<RawStarterProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<RawComponent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<RawCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Events>,
}

/// Component union
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift: Option<KubernetesLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomComponent>,
}

impl RawComponent {
    /// Type tags of every populated member, in declaration order.
    pub fn populated(&self) -> Vec<ComponentType> {
        [
            (self.container.is_some(), ComponentType::Container),
            (self.volume.is_some(), ComponentType::Volume),
            (self.kubernetes.is_some(), ComponentType::Kubernetes),
            (self.openshift.is_some(), ComponentType::Openshift),
            (self.plugin.is_some(), ComponentType::Plugin),
            (self.custom.is_some(), ComponentType::Custom),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }
}

impl TryFrom<RawComponent> for Component {
    type Error = Error;

    fn try_from(raw: RawComponent) -> Result<Self> {
        let kind = match variant::component_type(&raw)? {
            ComponentType::Container => raw.container.map(ComponentKind::Container),
            ComponentType::Volume => raw.volume.map(ComponentKind::Volume),
            ComponentType::Kubernetes => raw.kubernetes.map(ComponentKind::Kubernetes),
            ComponentType::Openshift => raw.openshift.map(ComponentKind::Openshift),
            ComponentType::Plugin => raw.plugin.map(ComponentKind::Plugin),
            ComponentType::Custom => raw.custom.map(ComponentKind::Custom),
        };
        let kind = kind.ok_or_else(|| Error::UnknownVariant {
            entity: "component".to_string(),
            name: raw.name.clone(),
        })?;
        Ok(Component {
            name: raw.name,
            attributes: raw.attributes,
            kind,
        })
    }
}

impl From<Component> for RawComponent {
    fn from(component: Component) -> Self {
        let mut raw = RawComponent {
            name: component.name,
            attributes: component.attributes,
            ..RawComponent::default()
        };
        match component.kind {
            ComponentKind::Container(c) => raw.container = Some(c),
            ComponentKind::Volume(v) => raw.volume = Some(v),
            ComponentKind::Kubernetes(k) => raw.kubernetes = Some(k),
            ComponentKind::Openshift(o) => raw.openshift = Some(o),
            ComponentKind::Plugin(p) => raw.plugin = Some(p),
            ComponentKind::Custom(c) => raw.custom = Some(c),
        }
        raw
    }
}

/// Command union
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    pub id: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply: Option<ApplyCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomCommand>,
}

impl RawCommand {
    pub fn populated(&self) -> Vec<CommandType> {
        [
            (self.exec.is_some(), CommandType::Exec),
            (self.composite.is_some(), CommandType::Composite),
            (self.apply.is_some(), CommandType::Apply),
            (self.custom.is_some(), CommandType::Custom),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }
}

impl TryFrom<RawCommand> for Command {
    type Error = Error;

    fn try_from(raw: RawCommand) -> Result<Self> {
        let kind = match variant::command_type(&raw)? {
            CommandType::Exec => raw.exec.map(CommandKind::Exec),
            CommandType::Composite => raw.composite.map(CommandKind::Composite),
            CommandType::Apply => raw.apply.map(CommandKind::Apply),
            CommandType::Custom => raw.custom.map(CommandKind::Custom),
        };
        let kind = kind.ok_or_else(|| Error::UnknownVariant {
            entity: "command".to_string(),
            name: raw.id.clone(),
        })?;
        Ok(Command {
            id: raw.id,
            attributes: raw.attributes,
            kind,
        })
    }
}

impl From<Command> for RawCommand {
    fn from(command: Command) -> Self {
        let mut raw = RawCommand {
            id: command.id,
            attributes: command.attributes,
            ..RawCommand::default()
        };
        match command.kind {
            CommandKind::Exec(e) => raw.exec = Some(e),
            CommandKind::Composite(c) => raw.composite = Some(c),
            CommandKind::Apply(a) => raw.apply = Some(a),
            CommandKind::Custom(c) => raw.custom = Some(c),
        }
        raw
    }
}

/// Project source union, shared by projects and starter projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProjectSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitLikeProjectSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitLikeProjectSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<ZipProjectSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomProjectSource>,
}

impl RawProjectSource {
    pub fn populated(&self) -> Vec<ProjectSourceType> {
        [
            (self.git.is_some(), ProjectSourceType::Git),
            (self.github.is_some(), ProjectSourceType::Github),
            (self.zip.is_some(), ProjectSourceType::Zip),
            (self.custom.is_some(), ProjectSourceType::Custom),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }

    /// A project without a source is allowed; several sources are not.
    fn into_source(self, project: &str) -> Result<Option<ProjectSource>> {
        if self.populated().is_empty() {
            return Ok(None);
        }
        let source = match variant::project_source_type(project, &self)? {
            ProjectSourceType::Git => self.git.map(ProjectSource::Git),
            ProjectSourceType::Github => self.github.map(ProjectSource::Github),
            ProjectSourceType::Zip => self.zip.map(ProjectSource::Zip),
            ProjectSourceType::Custom => self.custom.map(ProjectSource::Custom),
        };
        match source {
            Some(source) => Ok(Some(source)),
            None => Err(Error::InvalidSourceType {
                name: project.to_string(),
            }),
        }
    }
}

impl From<Option<ProjectSource>> for RawProjectSource {
    fn from(source: Option<ProjectSource>) -> Self {
        let mut raw = RawProjectSource::default();
        match source {
            Some(ProjectSource::Git(g)) => raw.git = Some(g),
            Some(ProjectSource::Github(g)) => raw.github = Some(g),
            Some(ProjectSource::Zip(z)) => raw.zip = Some(z),
            Some(ProjectSource::Custom(c)) => raw.custom = Some(c),
            None => {}
        }
        raw
    }
}

/// Project with its inline source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_path: Option<String>,
    #[serde(flatten)]
    pub source: RawProjectSource,
}

impl TryFrom<RawProject> for Project {
    type Error = Error;

    fn try_from(raw: RawProject) -> Result<Self> {
        let source = raw.source.into_source(&raw.name)?;
        Ok(Project {
            name: raw.name,
            attributes: raw.attributes,
            clone_path: raw.clone_path,
            source,
        })
    }
}

impl From<Project> for RawProject {
    fn from(project: Project) -> Self {
        RawProject {
            name: project.name,
            attributes: project.attributes,
            clone_path: project.clone_path,
            source: project.source.into(),
        }
    }
}

/// Starter project with its inline source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStarterProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_dir: Option<String>,
    #[serde(flatten)]
    pub source: RawProjectSource,
}

impl TryFrom<RawStarterProject> for StarterProject {
    type Error = Error;

    fn try_from(raw: RawStarterProject) -> Result<Self> {
        let source = raw.source.into_source(&raw.name)?;
        Ok(StarterProject {
            name: raw.name,
            attributes: raw.attributes,
            description: raw.description,
            sub_dir: raw.sub_dir,
            source,
        })
    }
}

impl From<StarterProject> for RawStarterProject {
    fn from(project: StarterProject) -> Self {
        RawStarterProject {
            name: project.name,
            attributes: project.attributes,
            description: project.description,
            sub_dir: project.sub_dir,
            source: project.source.into(),
        }
    }
}

//! Component definitions

use super::Attributes;
use crate::variant::ComponentType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A workload unit of the devfile.
///
/// Names are unique among components of the same kind only: a container and
/// a volume may share a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub attributes: Attributes,
    pub kind: ComponentKind,
}

/// The populated member of the component union.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Container(Container),
    Volume(Volume),
    Kubernetes(KubernetesLike),
    Openshift(KubernetesLike),
    Plugin(PluginComponent),
    Custom(CustomComponent),
}

impl ComponentKind {
    /// Type tag of this variant
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Container(_) => ComponentType::Container,
            ComponentKind::Volume(_) => ComponentType::Volume,
            ComponentKind::Kubernetes(_) => ComponentType::Kubernetes,
            ComponentKind::Openshift(_) => ComponentType::Openshift,
            ComponentKind::Plugin(_) => ComponentType::Plugin,
            ComponentKind::Custom(_) => ComponentType::Custom,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.component_type(), f)
    }
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            kind,
        }
    }

    /// Create a container component
    pub fn container(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, ComponentKind::Container(container))
    }

    /// Create a volume component
    pub fn volume(name: impl Into<String>, volume: Volume) -> Self {
        Self::new(name, ComponentKind::Volume(volume))
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ComponentKind::Container(_))
    }

    pub fn is_volume(&self) -> bool {
        matches!(self.kind, ComponentKind::Volume(_))
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            ComponentKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            ComponentKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_volume(&self) -> Option<&Volume> {
        match &self.kind {
            ComponentKind::Volume(volume) => Some(volume),
            _ => None,
        }
    }
}

/// Container component configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_request: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Volumes mounted into this container, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_sources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mapping: Option<String>,
}

impl Container {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn with_memory_limit(mut self, limit: impl Into<String>) -> Self {
        self.memory_limit = Some(limit.into());
        self
    }

    pub fn with_volume_mounts(mut self, mounts: Vec<VolumeMount>) -> Self {
        self.volume_mounts = mounts;
        self
    }
}

/// Environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Named attachment of a volume component inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Name of the volume component being mounted
    pub name: String,
    /// Mount path; empty means `/<name>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl VolumeMount {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The path the volume is mounted at, applying the `/<name>` default.
    pub fn effective_path(&self) -> String {
        if self.path.is_empty() {
            format!("/{}", self.name)
        } else {
            self.path.clone()
        }
    }
}

/// Network endpoint exposed by a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub name: String,
    pub target_port: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

/// Volume component configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

impl Volume {
    pub fn with_size(size: impl Into<String>) -> Self {
        Self {
            size: Some(size.into()),
            ephemeral: None,
        }
    }
}

/// Kubernetes or OpenShift resource, referenced by URI or inlined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesLike {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
}

/// Plugin component reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
}

/// Tool-specific component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomComponent {
    #[serde(default)]
    pub component_class: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub embedded_resource: serde_json::Value,
}

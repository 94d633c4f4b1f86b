//! # Devfile Data Model
//!
//! Typed representation of the entities held by a devfile document. The
//! unions of the devfile format (component kinds, command kinds, project
//! sources) are closed Rust enums here, so a typed value always has exactly
//! one populated variant. The on-disk shape, with one optional field per
//! union member, lives in [`crate::raw`].
//!
//! ## Modules
//!
//! - `component`: containers, volumes, Kubernetes/OpenShift resources,
//!   plugins and custom components, plus volume mounts.
//! - `command`: exec, composite, apply and custom commands and their groups.
//! - `project`: projects, starter projects and their sources.
//! - `events`: the four lifecycle event slots.
//! - `metadata`: document metadata and the parent reference.

pub mod command;
pub mod component;
pub mod events;
pub mod metadata;
pub mod project;

use std::collections::BTreeMap;

pub use command::{
    ApplyCommand, Command, CommandGroup, CommandGroupKind, CommandKind, CompositeCommand,
    CustomCommand, ExecCommand,
};
pub use component::{
    Component, ComponentKind, Container, CustomComponent, Endpoint, EnvVar, KubernetesLike,
    PluginComponent, Volume, VolumeMount,
};
pub use events::Events;
pub use metadata::{KubernetesReference, Metadata, Parent};
pub use project::{
    CheckoutFrom, CustomProjectSource, DefaultSource, GitLikeProjectSource, Project,
    ProjectSource, StarterProject, ZipProjectSource,
};

/// Free-form attributes attached to an entity or to the whole document.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Top-level variables, used for `{{name}}` substitution.
pub type Variables = BTreeMap<String, String>;

/// Builds an attribute bag from string pairs.
///
/// # Examples
///
/// ```
/// use devfile::model::attributes_from_strings;
///
/// let attrs = attributes_from_strings([("tier", "backend")]);
/// assert_eq!(attrs["tier"], "backend");
/// ```
pub fn attributes_from_strings<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
        .collect()
}

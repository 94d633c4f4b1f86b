//! # Devfile Document
//!
//! This module holds the aggregate root of the crate, [`DevfileV2`], and the
//! capability interface it implements, [`DevfileData`].
//!
//! ## Key Components
//!
//! - **`DevfileV2`**: A schema-versioned document. The schema level is
//!   resolved once, at construction, from an explicit [`SchemaRegistry`], and
//!   decides which features the document exposes.
//!
//! - **`WorkspaceContent`**: The workspace block of the document: components,
//!   commands, projects, starter projects, events and the top-level
//!   attribute and variable maps.
//!
//! - **`DevfileData`**: Every query and mutation a caller can perform. The
//!   implementation is split by concern:
//!   - `components`: component CRUD and the container/volume views.
//!   - `commands`: command CRUD with case-insensitive ids.
//!   - `projects`: project and starter project CRUD.
//!   - `volumes`: volume mounts across container components.
//!   - `events`: the four lifecycle event slots.
//!   - `top_level`: schema-gated top-level attributes and variables.
//!
//! ## Mutation semantics
//!
//! Collection adds validate each entity against the live collection right
//! before appending it, so a failing batch keeps the entities appended before
//! the failure. Callers that need all-or-nothing behaviour wrap the calls in
//! [`DevfileV2::atomically`]. Updates of a missing key are silent no-ops.

mod commands;
mod components;
mod events;
mod projects;
mod top_level;
mod volumes;

use crate::error::{Error, Result};
use crate::filter::DevfileOptions;
use crate::model::{
    Attributes, Command, Component, Events, Metadata, Parent, Project, StarterProject,
    Variables, VolumeMount,
};
use crate::raw::RawDevfile;
use crate::schema::{SchemaLevel, SchemaRegistry};
use log::debug;
use std::collections::BTreeMap;

/// The workspace block of a devfile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceContent {
    pub components: Vec<Component>,
    pub commands: Vec<Command>,
    pub projects: Vec<Project>,
    pub starter_projects: Vec<StarterProject>,
    pub events: Option<Events>,
    pub attributes: Attributes,
    pub variables: Variables,
}

/// A devfile document of schema version 2.x
#[derive(Debug, Clone, PartialEq)]
pub struct DevfileV2 {
    schema_version: String,
    level: SchemaLevel,
    metadata: Metadata,
    parent: Option<Parent>,
    content: WorkspaceContent,
}

impl DevfileV2 {
    /// An empty document of the given schema version.
    pub fn new(schema_version: &str, registry: &SchemaRegistry) -> Result<Self> {
        let level = registry.resolve(schema_version)?;
        Ok(Self {
            schema_version: schema_version.to_string(),
            level,
            metadata: Metadata::default(),
            parent: None,
            content: WorkspaceContent::default(),
        })
    }

    /// Build a document from a raw tree.
    ///
    /// `schema_version` selects the schema level; a `schemaVersion` field in
    /// the tree itself is ignored here (see [`crate::parser`]).
    pub fn from_raw(
        tree: serde_yaml::Value,
        schema_version: &str,
        registry: &SchemaRegistry,
    ) -> Result<Self> {
        let raw: RawDevfile = serde_yaml::from_value(tree).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some("check the field names and nesting of the devfile".to_string()),
        })?;
        Self::from_raw_devfile(raw, schema_version, registry)
    }

    /// Build a document from an already decoded [`RawDevfile`].
    pub fn from_raw_devfile(
        raw: RawDevfile,
        schema_version: &str,
        registry: &SchemaRegistry,
    ) -> Result<Self> {
        let level = registry.resolve(schema_version)?;
        if !level.supports_top_level_variables()
            && (!raw.variables.is_empty() || !raw.attributes.is_empty())
        {
            debug!(
                "schema version {} carries top-level variables or attributes; they are kept but not exposed",
                schema_version
            );
        }

        let content = WorkspaceContent {
            components: convert_all(raw.components)?,
            commands: convert_all(raw.commands)?,
            projects: convert_all(raw.projects)?,
            starter_projects: convert_all(raw.starter_projects)?,
            events: raw.events,
            attributes: raw.attributes,
            variables: raw.variables,
        };
        debug!(
            "loaded devfile {:?} (schema {}): {} components, {} commands, {} projects",
            raw.metadata.name,
            schema_version,
            content.components.len(),
            content.commands.len(),
            content.projects.len()
        );

        Ok(Self {
            schema_version: schema_version.to_string(),
            level,
            metadata: raw.metadata,
            parent: raw.parent,
            content,
        })
    }

    /// Convert back to the on-disk shape.
    pub fn to_raw(&self) -> RawDevfile {
        let content = self.content.clone();
        RawDevfile {
            schema_version: Some(self.schema_version.clone()),
            metadata: self.metadata.clone(),
            parent: self.parent.clone(),
            variables: content.variables,
            attributes: content.attributes,
            projects: content.projects.into_iter().map(Into::into).collect(),
            starter_projects: content.starter_projects.into_iter().map(Into::into).collect(),
            components: content.components.into_iter().map(Into::into).collect(),
            commands: content.commands.into_iter().map(Into::into).collect(),
            events: content.events.filter(|events| !events.is_empty()),
        }
    }

    pub fn schema_level(&self) -> SchemaLevel {
        self.level
    }

    pub fn content(&self) -> &WorkspaceContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut WorkspaceContent {
        &mut self.content
    }

    /// Run `f` against the document, restoring the previous state if it
    /// fails.
    ///
    /// ```
    /// use devfile::devfile::{DevfileData, DevfileV2};
    /// use devfile::model::{Component, Volume};
    /// use devfile::schema::SchemaRegistry;
    ///
    /// let mut doc = DevfileV2::new("2.2.0", &SchemaRegistry::default()).unwrap();
    /// let batch = vec![
    ///     Component::volume("data", Volume::default()),
    ///     Component::volume("data", Volume::default()),
    /// ];
    /// assert!(doc.atomically(|d| d.add_components(batch)).is_err());
    /// assert!(doc.content().components.is_empty());
    /// ```
    pub fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!("rolling back devfile changes: {}", e);
                *self = snapshot;
                Err(e)
            }
        }
    }
}

fn convert_all<R, T>(raw: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    raw.into_iter().map(T::try_from).collect()
}

/// Queries and mutations available on a devfile document
pub trait DevfileData {
    fn get_schema_version(&self) -> &str;
    /// Change the schema version, re-resolving the schema level.
    fn set_schema_version(&mut self, version: &str, registry: &SchemaRegistry) -> Result<()>;

    fn get_metadata(&self) -> &Metadata;
    fn set_metadata(&mut self, metadata: Metadata);
    fn get_parent(&self) -> Option<&Parent>;
    fn set_parent(&mut self, parent: Option<Parent>);

    fn get_components(&self, options: &DevfileOptions) -> Result<Vec<Component>>;
    fn get_devfile_container_components(&self, options: &DevfileOptions) -> Result<Vec<Component>>;
    fn get_devfile_volume_components(&self, options: &DevfileOptions) -> Result<Vec<Component>>;
    fn add_components(&mut self, components: Vec<Component>) -> Result<()>;
    fn update_component(&mut self, component: Component);
    fn delete_component(&mut self, name: &str) -> Result<()>;

    fn get_commands(&self, options: &DevfileOptions) -> Result<Vec<Command>>;
    /// Commands keyed by lower-cased id.
    fn get_command_map(&self) -> BTreeMap<String, Command>;
    fn add_commands(&mut self, commands: Vec<Command>) -> Result<()>;
    fn update_command(&mut self, command: Command);
    fn delete_command(&mut self, id: &str) -> Result<()>;

    fn get_projects(&self, options: &DevfileOptions) -> Result<Vec<Project>>;
    fn add_projects(&mut self, projects: Vec<Project>) -> Result<()>;
    fn update_project(&mut self, project: Project);
    fn delete_project(&mut self, name: &str) -> Result<()>;

    fn get_starter_projects(&self, options: &DevfileOptions) -> Result<Vec<StarterProject>>;
    fn add_starter_projects(&mut self, projects: Vec<StarterProject>) -> Result<()>;
    fn update_starter_project(&mut self, project: StarterProject);
    fn delete_starter_project(&mut self, name: &str) -> Result<()>;

    fn add_volume_mounts(&mut self, container: &str, mounts: Vec<VolumeMount>) -> Result<()>;
    fn delete_volume_mount(&mut self, volume: &str) -> Result<()>;
    fn get_volume_mount_paths(&self, mount: &str, component: &str) -> Result<Vec<String>>;

    fn get_events(&self) -> Events;
    fn add_events(&mut self, events: Events) -> Result<()>;
    fn update_events(
        &mut self,
        post_start: Vec<String>,
        post_stop: Vec<String>,
        pre_start: Vec<String>,
        pre_stop: Vec<String>,
    );

    fn get_top_level_attributes(&self) -> Result<&Attributes>;
    fn get_top_level_variables(&self) -> Result<&Variables>;
    fn update_top_level_variables(&mut self, variables: Variables) -> Result<()>;
}

impl DevfileData for DevfileV2 {
    fn get_schema_version(&self) -> &str {
        &self.schema_version
    }

    fn set_schema_version(&mut self, version: &str, registry: &SchemaRegistry) -> Result<()> {
        self.level = registry.resolve(version)?;
        self.schema_version = version.to_string();
        Ok(())
    }

    fn get_metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    fn get_parent(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: Option<Parent>) {
        self.parent = parent;
    }

    fn get_components(&self, options: &DevfileOptions) -> Result<Vec<Component>> {
        components::get(&self.content, options)
    }

    fn get_devfile_container_components(&self, options: &DevfileOptions) -> Result<Vec<Component>> {
        components::get_containers(&self.content, options)
    }

    fn get_devfile_volume_components(&self, options: &DevfileOptions) -> Result<Vec<Component>> {
        components::get_volumes(&self.content, options)
    }

    fn add_components(&mut self, components: Vec<Component>) -> Result<()> {
        components::add(&mut self.content, components)
    }

    fn update_component(&mut self, component: Component) {
        components::update(&mut self.content, component)
    }

    fn delete_component(&mut self, name: &str) -> Result<()> {
        components::delete(&mut self.content, name)
    }

    fn get_commands(&self, options: &DevfileOptions) -> Result<Vec<Command>> {
        commands::get(&self.content, options)
    }

    fn get_command_map(&self) -> BTreeMap<String, Command> {
        commands::command_map(&self.content)
    }

    fn add_commands(&mut self, commands: Vec<Command>) -> Result<()> {
        commands::add(&mut self.content, commands)
    }

    fn update_command(&mut self, command: Command) {
        commands::update(&mut self.content, command)
    }

    fn delete_command(&mut self, id: &str) -> Result<()> {
        commands::delete(&mut self.content, id)
    }

    fn get_projects(&self, options: &DevfileOptions) -> Result<Vec<Project>> {
        projects::get(&self.content.projects, options)
    }

    fn add_projects(&mut self, projects: Vec<Project>) -> Result<()> {
        projects::add(&mut self.content.projects, projects)
    }

    fn update_project(&mut self, project: Project) {
        projects::update(&mut self.content.projects, project)
    }

    fn delete_project(&mut self, name: &str) -> Result<()> {
        projects::delete(&mut self.content.projects, name)
    }

    fn get_starter_projects(&self, options: &DevfileOptions) -> Result<Vec<StarterProject>> {
        projects::get(&self.content.starter_projects, options)
    }

    fn add_starter_projects(&mut self, projects: Vec<StarterProject>) -> Result<()> {
        projects::add(&mut self.content.starter_projects, projects)
    }

    fn update_starter_project(&mut self, project: StarterProject) {
        projects::update(&mut self.content.starter_projects, project)
    }

    fn delete_starter_project(&mut self, name: &str) -> Result<()> {
        projects::delete(&mut self.content.starter_projects, name)
    }

    fn add_volume_mounts(&mut self, container: &str, mounts: Vec<VolumeMount>) -> Result<()> {
        volumes::add_volume_mounts(&mut self.content, container, mounts)
    }

    fn delete_volume_mount(&mut self, volume: &str) -> Result<()> {
        volumes::delete_volume_mount(&mut self.content, volume)
    }

    fn get_volume_mount_paths(&self, mount: &str, component: &str) -> Result<Vec<String>> {
        volumes::get_volume_mount_paths(&self.content, mount, component)
    }

    fn get_events(&self) -> Events {
        events::get(&self.content)
    }

    fn add_events(&mut self, events: Events) -> Result<()> {
        events::add(&mut self.content, events)
    }

    fn update_events(
        &mut self,
        post_start: Vec<String>,
        post_stop: Vec<String>,
        pre_start: Vec<String>,
        pre_stop: Vec<String>,
    ) {
        events::update(
            &mut self.content,
            Events {
                pre_start,
                post_start,
                pre_stop,
                post_stop,
            },
        )
    }

    fn get_top_level_attributes(&self) -> Result<&Attributes> {
        top_level::attributes(self)
    }

    fn get_top_level_variables(&self) -> Result<&Variables> {
        top_level::variables(self)
    }

    fn update_top_level_variables(&mut self, variables: Variables) -> Result<()> {
        top_level::update_variables(self, variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Container, ExecCommand, Volume};

    pub(crate) fn document(version: &str) -> DevfileV2 {
        DevfileV2::new(version, &SchemaRegistry::default()).unwrap()
    }

    #[test]
    fn test_new_resolves_level() {
        assert_eq!(document("2.0.0").schema_level(), SchemaLevel::Base);
        assert_eq!(document("2.2.0").schema_level(), SchemaLevel::Extended);
        assert!(DevfileV2::new("1.0.0", &SchemaRegistry::default()).is_err());
    }

    #[test]
    fn test_set_schema_version_reresolves_level() {
        let mut doc = document("2.0.0");
        doc.set_schema_version("2.1.0", &SchemaRegistry::default())
            .unwrap();
        assert_eq!(doc.get_schema_version(), "2.1.0");
        assert_eq!(doc.schema_level(), SchemaLevel::Extended);

        doc.set_schema_version("2.2.1", &SchemaRegistry::default())
            .unwrap();
        assert_eq!(doc.get_schema_version(), "2.2.1");
        assert_eq!(doc.schema_level(), SchemaLevel::Extended);

        // A rejected version leaves the document untouched.
        assert!(doc
            .set_schema_version("2.1", &SchemaRegistry::default())
            .is_err());
        assert!(doc
            .set_schema_version("1.0.0", &SchemaRegistry::default())
            .is_err());
        assert_eq!(doc.get_schema_version(), "2.2.1");
    }

    #[test]
    fn test_from_raw_builds_typed_content() {
        let tree: serde_yaml::Value = serde_yaml::from_str(
            r#"
schemaVersion: 2.2.0
metadata:
  name: nodejs
components:
  - name: runtime
    container:
      image: node:18
commands:
  - id: Install
    exec:
      component: runtime
      commandLine: npm install
"#,
        )
        .unwrap();
        let doc = DevfileV2::from_raw(tree, "2.2.0", &SchemaRegistry::default()).unwrap();
        assert_eq!(doc.get_metadata().name, "nodejs");
        assert_eq!(doc.content().components.len(), 1);
        // Ids are kept as written until they go through add/update.
        assert_eq!(doc.content().commands[0].id, "Install");
    }

    #[test]
    fn test_from_raw_rejects_wrong_shape() {
        let tree: serde_yaml::Value = serde_yaml::from_str("components: 3\n").unwrap();
        assert!(matches!(
            DevfileV2::from_raw(tree, "2.2.0", &SchemaRegistry::default()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_to_raw_round_trip() {
        let mut doc = document("2.1.0");
        doc.set_metadata(Metadata::new("app", "1.0.0"));
        doc.add_components(vec![
            Component::container("runtime", Container::new("image")),
            Component::volume("data", Volume::default()),
        ])
        .unwrap();
        doc.add_commands(vec![Command::exec("run", ExecCommand::new("runtime", "./run"))])
            .unwrap();

        let raw = doc.to_raw();
        assert_eq!(raw.schema_version.as_deref(), Some("2.1.0"));
        assert!(raw.events.is_none());
        let back = DevfileV2::from_raw_devfile(raw, "2.1.0", &SchemaRegistry::default()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_atomically_commits_on_success() {
        let mut doc = document("2.2.0");
        doc.atomically(|d| d.add_components(vec![Component::volume("data", Volume::default())]))
            .unwrap();
        assert_eq!(doc.content().components.len(), 1);
    }

    #[test]
    fn test_atomically_rolls_back_partial_add() {
        let mut doc = document("2.2.0");
        let result = doc.atomically(|d| {
            d.add_components(vec![Component::volume("a", Volume::default())])?;
            d.delete_command("missing")
        });
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert!(doc.content().components.is_empty());
    }
}

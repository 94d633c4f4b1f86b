//! # Filtering
//!
//! Every collection getter of [`crate::devfile::DevfileData`] takes a
//! [`DevfileOptions`]. It carries a key/value predicate over the entity's
//! attributes plus optional discriminators for the entity kind:
//!
//! - `filter`: every key must be present in the entity's attributes with an
//!   equal JSON value. Extra attributes are ignored and an empty filter
//!   matches everything.
//! - `component_options.component_type`: keep components of one kind.
//! - `command_options.command_type` and `command_group_kind`: keep commands
//!   of one kind and/or one group.
//! - `project_options.project_source_type`: keep projects with one source
//!   kind. Projects without a source cannot be filtered.

use crate::error::{Error, Result};
use crate::model::{Attributes, Command, CommandGroupKind, Component, ProjectSource};
use crate::variant::{CommandType, ComponentType, ProjectSourceType};

/// Options accepted by the collection getters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevfileOptions {
    pub filter: Attributes,
    pub component_options: ComponentOptions,
    pub command_options: CommandOptions,
    pub project_options: ProjectOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentOptions {
    pub component_type: Option<ComponentType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub command_type: Option<CommandType>,
    pub command_group_kind: Option<CommandGroupKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    pub project_source_type: Option<ProjectSourceType>,
}

impl DevfileOptions {
    /// Options that match everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Attributes) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_options.component_type = Some(component_type);
        self
    }

    pub fn with_command_type(mut self, command_type: CommandType) -> Self {
        self.command_options.command_type = Some(command_type);
        self
    }

    pub fn with_command_group_kind(mut self, kind: CommandGroupKind) -> Self {
        self.command_options.command_group_kind = Some(kind);
        self
    }

    pub fn with_project_source_type(mut self, source_type: ProjectSourceType) -> Self {
        self.project_options.project_source_type = Some(source_type);
        self
    }

    fn filters_projects(&self) -> bool {
        !self.filter.is_empty() || self.project_options.project_source_type.is_some()
    }
}

/// Subset match of `options.filter` against `attributes`.
///
/// Attribute values are already typed JSON, so the match itself cannot fail;
/// the `Result` keeps the signature shared with the project source check.
pub fn filter_devfile_object(attributes: &Attributes, options: &DevfileOptions) -> Result<bool> {
    Ok(options
        .filter
        .iter()
        .all(|(key, wanted)| attributes.get(key) == Some(wanted)))
}

pub(crate) fn matches_component(component: &Component, options: &DevfileOptions) -> Result<bool> {
    if !filter_devfile_object(&component.attributes, options)? {
        return Ok(false);
    }
    Ok(options
        .component_options
        .component_type
        .is_none_or(|wanted| component.component_type() == wanted))
}

pub(crate) fn matches_command(command: &Command, options: &DevfileOptions) -> Result<bool> {
    if !filter_devfile_object(&command.attributes, options)? {
        return Ok(false);
    }
    let opts = &options.command_options;
    if opts
        .command_type
        .is_some_and(|wanted| command.command_type() != wanted)
    {
        return Ok(false);
    }
    if let Some(wanted) = opts.command_group_kind {
        return Ok(command.group().is_some_and(|group| group.kind == wanted));
    }
    Ok(true)
}

/// Shared by projects and starter projects.
pub(crate) fn matches_project(
    name: &str,
    attributes: &Attributes,
    source: Option<&ProjectSource>,
    options: &DevfileOptions,
) -> Result<bool> {
    if !filter_devfile_object(attributes, options)? {
        return Ok(false);
    }
    if !options.filters_projects() {
        return Ok(true);
    }
    let source_type = source
        .map(ProjectSource::source_type)
        .ok_or_else(|| Error::InvalidSourceType {
            name: name.to_string(),
        })?;
    Ok(options
        .project_options
        .project_source_type
        .is_none_or(|wanted| wanted == source_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        attributes_from_strings, Container, ExecCommand, GitLikeProjectSource, Volume,
        ZipProjectSource,
    };
    use serde_json::json;

    #[test]
    fn test_empty_filter_matches_everything() {
        let options = DevfileOptions::all();
        assert!(filter_devfile_object(&Attributes::new(), &options).unwrap());
        let attrs = attributes_from_strings([("a", "b")]);
        assert!(filter_devfile_object(&attrs, &options).unwrap());
    }

    #[test]
    fn test_filter_is_subset_match() {
        let attrs = attributes_from_strings([("firstString", "firstStringValue"), ("extra", "x")]);
        let options =
            DevfileOptions::all().with_filter(attributes_from_strings([("firstString", "firstStringValue")]));
        assert!(filter_devfile_object(&attrs, &options).unwrap());

        let miss = DevfileOptions::all()
            .with_filter(attributes_from_strings([("firstString", "other")]));
        assert!(!filter_devfile_object(&attrs, &miss).unwrap());

        let absent = DevfileOptions::all()
            .with_filter(attributes_from_strings([("missing", "firstStringValue")]));
        assert!(!filter_devfile_object(&attrs, &absent).unwrap());
    }

    #[test]
    fn test_filter_compares_json_values() {
        let mut attrs = Attributes::new();
        attrs.insert("replicas".to_string(), json!(3));
        attrs.insert("labels".to_string(), json!({"tier": "web"}));

        let mut filter = Attributes::new();
        filter.insert("replicas".to_string(), json!(3));
        filter.insert("labels".to_string(), json!({"tier": "web"}));
        assert!(filter_devfile_object(&attrs, &DevfileOptions::all().with_filter(filter)).unwrap());

        let mut string_three = Attributes::new();
        string_three.insert("replicas".to_string(), json!("3"));
        assert!(
            !filter_devfile_object(&attrs, &DevfileOptions::all().with_filter(string_three)).unwrap()
        );
    }

    #[test]
    fn test_component_type_discriminator() {
        let container = Component::container("runtime", Container::new("image"));
        let volume = Component::volume("data", Volume::default());
        let options = DevfileOptions::all().with_component_type(ComponentType::Volume);
        assert!(!matches_component(&container, &options).unwrap());
        assert!(matches_component(&volume, &options).unwrap());
    }

    #[test]
    fn test_command_group_discriminator() {
        let build = Command::exec("build", ExecCommand::new("runtime", "make"))
            .with_group(CommandGroupKind::Build, true);
        let plain = Command::exec("plain", ExecCommand::new("runtime", "ls"));
        let options = DevfileOptions::all().with_command_group_kind(CommandGroupKind::Build);
        assert!(matches_command(&build, &options).unwrap());
        assert!(!matches_command(&plain, &options).unwrap());

        let by_type = DevfileOptions::all().with_command_type(CommandType::Composite);
        assert!(!matches_command(&build, &by_type).unwrap());
    }

    #[test]
    fn test_project_source_discriminator() {
        let git = ProjectSource::Git(GitLikeProjectSource::new([("origin", "url")]));
        let zip = ProjectSource::Zip(ZipProjectSource::default());
        let options = DevfileOptions::all().with_project_source_type(ProjectSourceType::Git);
        let attrs = Attributes::new();
        assert!(matches_project("p", &attrs, Some(&git), &options).unwrap());
        assert!(!matches_project("p", &attrs, Some(&zip), &options).unwrap());
    }

    #[test]
    fn test_project_without_source_cannot_be_filtered() {
        let attrs = attributes_from_strings([("k", "v")]);
        let options = DevfileOptions::all().with_filter(attrs.clone());
        match matches_project("bare", &attrs, None, &options) {
            Err(Error::InvalidSourceType { name }) => assert_eq!(name, "bare"),
            other => panic!("Expected InvalidSourceType, got {:?}", other),
        }

        // Without filtering the sourceless project is simply listed.
        assert!(matches_project("bare", &attrs, None, &DevfileOptions::all()).unwrap());
    }

    #[test]
    fn test_attribute_mismatch_skips_source_check() {
        let options = DevfileOptions::all().with_filter(attributes_from_strings([("k", "v")]));
        assert!(!matches_project("bare", &Attributes::new(), None, &options).unwrap());
    }
}

//! Component collection

use super::{volumes, WorkspaceContent};
use crate::error::{Error, Result};
use crate::filter::{matches_component, DevfileOptions};
use crate::model::Component;
use log::debug;

pub(super) fn get(content: &WorkspaceContent, options: &DevfileOptions) -> Result<Vec<Component>> {
    let mut components = Vec::new();
    for component in &content.components {
        if matches_component(component, options)? {
            components.push(component.clone());
        }
    }
    Ok(components)
}

pub(super) fn get_containers(
    content: &WorkspaceContent,
    options: &DevfileOptions,
) -> Result<Vec<Component>> {
    Ok(get(content, options)?
        .into_iter()
        .filter(Component::is_container)
        .collect())
}

pub(super) fn get_volumes(
    content: &WorkspaceContent,
    options: &DevfileOptions,
) -> Result<Vec<Component>> {
    Ok(get(content, options)?
        .into_iter()
        .filter(Component::is_volume)
        .collect())
}

fn same_key(a: &Component, b: &Component) -> bool {
    a.name == b.name && a.component_type() == b.component_type()
}

/// Appends each component unless one with the same name and kind is already
/// present. Components appended before a conflict are kept.
pub(super) fn add(content: &mut WorkspaceContent, components: Vec<Component>) -> Result<()> {
    for component in components {
        if content.components.iter().any(|c| same_key(c, &component)) {
            return Err(Error::already_exists(component.name, "component"));
        }
        content.components.push(component);
    }
    Ok(())
}

pub(super) fn update(content: &mut WorkspaceContent, component: Component) {
    match content
        .components
        .iter_mut()
        .find(|c| same_key(c, &component))
    {
        Some(existing) => *existing = component,
        None => debug!(
            "update skipped: no {} component named {}",
            component.component_type(),
            component.name
        ),
    }
}

/// Removes every component called `name`, whatever its kind.
///
/// When a non-container component goes, mounts of that name go with it.
pub(super) fn delete(content: &mut WorkspaceContent, name: &str) -> Result<()> {
    let before = content.components.len();
    let mut removed_non_container = false;
    content.components.retain(|c| {
        let keep = c.name != name;
        if !keep && !c.is_container() {
            removed_non_container = true;
        }
        keep
    });

    if content.components.len() == before {
        return Err(Error::not_found(name, "component"));
    }
    if removed_non_container {
        volumes::strip_mounts(content, name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::devfile::tests::document;
    use crate::devfile::DevfileData;
    use crate::error::Error;
    use crate::filter::DevfileOptions;
    use crate::model::{attributes_from_strings, Component, Container, Volume, VolumeMount};
    use crate::variant::ComponentType;

    fn container(name: &str) -> Component {
        Component::container(name, Container::new("image"))
    }

    fn volume(name: &str) -> Component {
        Component::volume(name, Volume::default())
    }

    #[test]
    fn test_add_components_keeps_order() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1"), volume("comp2")])
            .unwrap();
        doc.add_components(vec![container("comp3")]).unwrap();

        let names: Vec<String> = doc
            .get_components(&DevfileOptions::all())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["comp1", "comp2", "comp3"]);
    }

    #[test]
    fn test_container_and_volume_may_share_a_name() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("shared"), volume("shared")])
            .unwrap();
        assert_eq!(doc.content().components.len(), 2);
    }

    #[test]
    fn test_add_duplicate_keeps_earlier_items() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1")]).unwrap();

        let err = doc
            .add_components(vec![volume("comp2"), container("comp1"), volume("comp3")])
            .unwrap_err();
        match err {
            Error::AlreadyExists { name, field } => {
                assert_eq!(name, "comp1");
                assert_eq!(field, "component");
            }
            other => panic!("Expected AlreadyExists, got {:?}", other),
        }
        let names: Vec<&str> = doc
            .content()
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["comp1", "comp2"]);
    }

    #[test]
    fn test_duplicate_within_batch_fails_on_second() {
        let mut doc = document("2.2.0");
        assert!(doc
            .add_components(vec![volume("data"), volume("data")])
            .is_err());
        assert_eq!(doc.content().components.len(), 1);
    }

    #[test]
    fn test_get_components_filtered() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![
            container("comp1").with_attributes(attributes_from_strings([("tier", "web")])),
            container("comp2"),
            volume("comp3").with_attributes(attributes_from_strings([("tier", "web")])),
        ])
        .unwrap();

        let options =
            DevfileOptions::all().with_filter(attributes_from_strings([("tier", "web")]));
        let got = doc.get_components(&options).unwrap();
        assert_eq!(got.len(), 2);

        let containers = doc.get_devfile_container_components(&options).unwrap();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "comp1");

        let volumes = doc
            .get_devfile_volume_components(&DevfileOptions::all())
            .unwrap();
        assert_eq!(volumes.len(), 1);

        let by_kind = doc
            .get_components(&DevfileOptions::all().with_component_type(ComponentType::Container))
            .unwrap();
        assert_eq!(by_kind.len(), 2);
    }

    #[test]
    fn test_update_component() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1")]).unwrap();

        let updated = Component::container("comp1", Container::new("image").with_memory_limit("1Gi"));
        doc.update_component(updated.clone());
        assert_eq!(doc.content().components, vec![updated]);
    }

    #[test]
    fn test_update_missing_component_is_noop() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1")]).unwrap();
        let before = doc.clone();

        doc.update_component(volume("comp1"));
        doc.update_component(container("other"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_component() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1"), container("comp2")])
            .unwrap();
        doc.delete_component("comp1").unwrap();
        assert_eq!(doc.content().components, vec![container("comp2")]);
    }

    #[test]
    fn test_delete_missing_component_changes_nothing() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![container("comp1")]).unwrap();
        let before = doc.clone();

        match doc.delete_component("comp2") {
            Err(Error::NotFound { name, field }) => {
                assert_eq!(name, "comp2");
                assert_eq!(field, "component");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_volume_component_strips_mounts() {
        let mut doc = document("2.2.0");
        let runtime = Component::container(
            "runtime",
            Container::new("image").with_volume_mounts(vec![
                VolumeMount::new("data", "/data"),
                VolumeMount::new("cache", "/cache"),
            ]),
        );
        let tools = Component::container(
            "tools",
            Container::new("image").with_volume_mounts(vec![VolumeMount::new("data", "/d")]),
        );
        doc.add_components(vec![runtime, tools, volume("data"), volume("cache")])
            .unwrap();

        doc.delete_component("data").unwrap();

        let containers = doc
            .get_devfile_container_components(&DevfileOptions::all())
            .unwrap();
        assert_eq!(
            containers[0].as_container().unwrap().volume_mounts,
            vec![VolumeMount::new("cache", "/cache")]
        );
        assert!(containers[1].as_container().unwrap().volume_mounts.is_empty());
        assert_eq!(doc.get_devfile_volume_components(&DevfileOptions::all()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_shared_name_removes_every_kind_and_strips_mounts() {
        let mut doc = document("2.2.0");
        let app = Component::container(
            "app",
            Container::new("image").with_volume_mounts(vec![
                VolumeMount::new("shared", "/shared"),
                VolumeMount::new("logs", "/logs"),
            ]),
        );
        doc.add_components(vec![container("shared"), volume("shared"), app, volume("logs")])
            .unwrap();

        doc.delete_component("shared").unwrap();

        let names: Vec<String> = doc
            .get_components(&DevfileOptions::all())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["app", "logs"]);
        assert_eq!(
            doc.content().components[0].as_container().unwrap().volume_mounts,
            vec![VolumeMount::new("logs", "/logs")]
        );
        assert!(matches!(
            doc.delete_component("shared"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_container_leaves_same_named_mounts() {
        let mut doc = document("2.2.0");
        let other = Component::container(
            "other",
            Container::new("image").with_volume_mounts(vec![VolumeMount::new("app", "/app")]),
        );
        doc.add_components(vec![container("app"), other]).unwrap();

        doc.delete_component("app").unwrap();
        assert_eq!(
            doc.content().components[0].as_container().unwrap().volume_mounts.len(),
            1
        );
    }
}

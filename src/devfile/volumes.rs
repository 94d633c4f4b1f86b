//! Volume mounts
//!
//! A volume mount links a volume component to a path inside a container
//! component. Within one container no two mounts may share a path, where an
//! empty path stands for `/<volume name>`.

use super::WorkspaceContent;
use crate::error::{Error, Result};
use crate::model::{Component, Container, VolumeMount};

fn find_container<'a>(content: &'a WorkspaceContent, name: &str) -> Option<&'a Container> {
    content
        .components
        .iter()
        .filter(|c| c.name == name)
        .find_map(Component::as_container)
}

fn find_container_mut<'a>(
    content: &'a mut WorkspaceContent,
    name: &str,
) -> Option<&'a mut Container> {
    content
        .components
        .iter_mut()
        .filter(|c| c.name == name)
        .find_map(Component::as_container_mut)
}

/// Mount `mounts` into the container `container_name`.
///
/// Every path collision, with an existing mount or between the requested
/// mounts, is reported in a single `PathConflict` and nothing is mounted.
pub(super) fn add_volume_mounts(
    content: &mut WorkspaceContent,
    container_name: &str,
    mounts: Vec<VolumeMount>,
) -> Result<()> {
    let container = find_container_mut(content, container_name)
        .ok_or_else(|| Error::not_found(container_name, "container component"))?;

    let mut taken: Vec<(String, &str)> = container
        .volume_mounts
        .iter()
        .map(|m| (m.effective_path(), m.name.as_str()))
        .collect();
    let mut conflicts = Vec::new();
    for mount in &mounts {
        let path = mount.effective_path();
        if let Some((_, other)) = taken.iter().find(|(p, _)| *p == path) {
            conflicts.push(format!(
                "unable to mount volume {}, as another volume {} is mounted to the same path {} in the container {}",
                mount.name, other, path, container_name
            ));
        } else {
            taken.push((path, mount.name.as_str()));
        }
    }
    if !conflicts.is_empty() {
        return Err(Error::PathConflict { conflicts });
    }

    container.volume_mounts.extend(mounts);
    Ok(())
}

/// Remove every mount of `volume` from every container.
pub(super) fn delete_volume_mount(content: &mut WorkspaceContent, volume: &str) -> Result<()> {
    if strip_mounts(content, volume) == 0 {
        return Err(Error::not_found(volume, "volume mount"));
    }
    Ok(())
}

pub(super) fn get_volume_mount_paths(
    content: &WorkspaceContent,
    mount: &str,
    component: &str,
) -> Result<Vec<String>> {
    let container = find_container(content, component)
        .ok_or_else(|| Error::not_found(component, "container component"))?;
    let paths: Vec<String> = container
        .volume_mounts
        .iter()
        .filter(|m| m.name == mount)
        .map(VolumeMount::effective_path)
        .collect();
    if paths.is_empty() {
        return Err(Error::NotMounted {
            volume: mount.to_string(),
            component: component.to_string(),
        });
    }
    Ok(paths)
}

/// Drop mounts named `volume` from all containers, returning how many went.
pub(super) fn strip_mounts(content: &mut WorkspaceContent, volume: &str) -> usize {
    content
        .components
        .iter_mut()
        .filter_map(Component::as_container_mut)
        .map(|container| {
            let before = container.volume_mounts.len();
            container.volume_mounts.retain(|m| m.name != volume);
            before - container.volume_mounts.len()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use crate::devfile::tests::document;
    use crate::devfile::{DevfileData, DevfileV2};
    use crate::error::Error;
    use crate::filter::DevfileOptions;
    use crate::model::{Component, Container, Volume, VolumeMount};

    fn with_container(mounts: Vec<VolumeMount>) -> DevfileV2 {
        let mut doc = document("2.2.0");
        doc.add_components(vec![
            Component::container("container0", Container::new("image").with_volume_mounts(mounts)),
            Component::container("container1", Container::new("image")),
        ])
        .unwrap();
        doc
    }

    fn mounts_of(doc: &DevfileV2, container: &str) -> Vec<VolumeMount> {
        doc.content()
            .components
            .iter()
            .find(|c| c.name == container)
            .and_then(Component::as_container)
            .map(|c| c.volume_mounts.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_volume_mount_when_other_mounts_present() {
        let mut doc = with_container(vec![VolumeMount::new("volume1", "/data")]);
        doc.add_volume_mounts("container0", vec![VolumeMount::new("volume0", "/path0")])
            .unwrap();
        assert_eq!(
            mounts_of(&doc, "container0"),
            vec![
                VolumeMount::new("volume1", "/data"),
                VolumeMount::new("volume0", "/path0"),
            ]
        );
        assert!(mounts_of(&doc, "container1").is_empty());
    }

    #[test]
    fn test_add_volume_mount_same_path_mutates_nothing() {
        let existing = vec![
            VolumeMount::new("volume1", "/data"),
            VolumeMount::new("volume0", "/path0"),
        ];
        let mut doc = with_container(existing.clone());
        let err = doc
            .add_volume_mounts(
                "container0",
                vec![
                    VolumeMount::new("volume0", "/data"),
                    VolumeMount::new("volume1", "/path0"),
                ],
            )
            .unwrap_err();
        match err {
            Error::PathConflict { conflicts } => {
                assert_eq!(conflicts.len(), 2);
                assert_eq!(
                    conflicts[0],
                    "unable to mount volume volume0, as another volume volume1 is mounted to the same path /data in the container container0"
                );
            }
            other => panic!("Expected PathConflict, got {:?}", other),
        }
        assert_eq!(mounts_of(&doc, "container0"), existing);
    }

    #[test]
    fn test_add_volume_mount_conflict_within_request() {
        let mut doc = with_container(Vec::new());
        let err = doc
            .add_volume_mounts(
                "container0",
                vec![VolumeMount::new("a", "/shared"), VolumeMount::new("b", "/shared")],
            )
            .unwrap_err();
        assert!(matches!(err, Error::PathConflict { .. }));
        assert!(mounts_of(&doc, "container0").is_empty());
    }

    #[test]
    fn test_add_volume_mount_empty_path_uses_default() {
        let mut doc = with_container(vec![VolumeMount::new("cache", "")]);
        let err = doc
            .add_volume_mounts("container0", vec![VolumeMount::new("other", "/cache")])
            .unwrap_err();
        assert!(err.to_string().contains("as another volume cache"));
    }

    #[test]
    fn test_add_volume_mount_container_not_found() {
        let mut doc = with_container(Vec::new());
        doc.add_components(vec![Component::volume("volume0", Volume::default())])
            .unwrap();
        for target in ["container2", "volume0"] {
            match doc.add_volume_mounts(target, vec![VolumeMount::new("volume0", "/path0")]) {
                Err(Error::NotFound { name, field }) => {
                    assert_eq!(name, target);
                    assert_eq!(field, "container component");
                }
                other => panic!("Expected NotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_delete_volume_mount_everywhere() {
        let mut doc = document("2.2.0");
        doc.add_components(vec![
            Component::container(
                "comp1",
                Container::new("image").with_volume_mounts(vec![
                    VolumeMount::new("comp2", "/path"),
                    VolumeMount::new("comp2", "/path2"),
                    VolumeMount::new("comp3", "/path"),
                ]),
            ),
            Component::container(
                "comp4",
                Container::new("image")
                    .with_volume_mounts(vec![VolumeMount::new("comp2", "/path3")]),
            ),
            Component::volume("comp2", Volume::default()),
        ])
        .unwrap();

        doc.delete_volume_mount("comp2").unwrap();
        assert_eq!(mounts_of(&doc, "comp1"), vec![VolumeMount::new("comp3", "/path")]);
        assert!(mounts_of(&doc, "comp4").is_empty());
        // The volume component itself stays.
        assert_eq!(
            doc.get_devfile_volume_components(&DevfileOptions::all())
                .unwrap()
                .len(),
            1
        );

        match doc.delete_volume_mount("comp2") {
            Err(Error::NotFound { name, field }) => {
                assert_eq!(name, "comp2");
                assert_eq!(field, "volume mount");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_get_volume_mount_paths() {
        let doc = with_container(vec![
            VolumeMount::new("volume1", "/path"),
            VolumeMount::new("volume1", "/path2"),
            VolumeMount::new("volume2", ""),
        ]);
        assert_eq!(
            doc.get_volume_mount_paths("volume1", "container0").unwrap(),
            vec!["/path", "/path2"]
        );
        assert_eq!(
            doc.get_volume_mount_paths("volume2", "container0").unwrap(),
            vec!["/volume2"]
        );
    }

    #[test]
    fn test_get_volume_mount_paths_not_mounted() {
        let doc = with_container(vec![VolumeMount::new("volume1", "/path")]);
        match doc.get_volume_mount_paths("volume1", "container1") {
            Err(Error::NotMounted { volume, component }) => {
                assert_eq!(volume, "volume1");
                assert_eq!(component, "container1");
            }
            other => panic!("Expected NotMounted, got {:?}", other),
        }
    }

    #[test]
    fn test_get_volume_mount_paths_invalid_container() {
        let doc = with_container(vec![VolumeMount::new("volume1", "/path")]);
        assert!(matches!(
            doc.get_volume_mount_paths("volume1", "container2"),
            Err(Error::NotFound { .. })
        ));
    }
}

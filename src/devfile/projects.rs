//! Project and starter project collections
//!
//! Both collections behave the same way, keyed by name, so the operations are
//! written once over [`ProjectEntry`].

use crate::error::{Error, Result};
use crate::filter::{matches_project, DevfileOptions};
use crate::model::{Attributes, Project, ProjectSource, StarterProject};
use log::debug;

/// A name-keyed entry of a project collection
pub(super) trait ProjectEntry: Clone {
    /// Collection name used in errors.
    const FIELD: &'static str;

    fn name(&self) -> &str;
    fn attributes(&self) -> &Attributes;
    fn source(&self) -> Option<&ProjectSource>;
}

impl ProjectEntry for Project {
    const FIELD: &'static str = "project";

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn source(&self) -> Option<&ProjectSource> {
        self.source.as_ref()
    }
}

impl ProjectEntry for StarterProject {
    const FIELD: &'static str = "starterProject";

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn source(&self) -> Option<&ProjectSource> {
        self.source.as_ref()
    }
}

pub(super) fn get<P: ProjectEntry>(entries: &[P], options: &DevfileOptions) -> Result<Vec<P>> {
    let mut projects = Vec::new();
    for entry in entries {
        if matches_project(entry.name(), entry.attributes(), entry.source(), options)? {
            projects.push(entry.clone());
        }
    }
    Ok(projects)
}

pub(super) fn add<P: ProjectEntry>(entries: &mut Vec<P>, projects: Vec<P>) -> Result<()> {
    for project in projects {
        if entries.iter().any(|p| p.name() == project.name()) {
            return Err(Error::already_exists(project.name(), P::FIELD));
        }
        entries.push(project);
    }
    Ok(())
}

pub(super) fn update<P: ProjectEntry>(entries: &mut [P], project: P) {
    match entries.iter_mut().find(|p| p.name() == project.name()) {
        Some(existing) => *existing = project,
        None => debug!("update skipped: no {} named {}", P::FIELD, project.name()),
    }
}

pub(super) fn delete<P: ProjectEntry>(entries: &mut Vec<P>, name: &str) -> Result<()> {
    let before = entries.len();
    entries.retain(|p| p.name() != name);
    if entries.len() == before {
        return Err(Error::not_found(name, P::FIELD));
    }
    Ok(())
}

//! # Top-Level Variable Substitution
//!
//! Schemas from 2.1.0 on let a devfile declare top-level `variables` and
//! reference them as `{{name}}` in the string fields of commands, components,
//! projects and starter projects. [`validate_and_replace`] rewrites those
//! references in place. A reference to an undeclared variable is left as is
//! and reported in the returned [`VariableWarning`].

use crate::devfile::{DevfileData, DevfileV2};
use crate::error::Result;
use crate::model::{CommandKind, ComponentKind, EnvVar, ProjectSource, Variables};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};

const VARIABLE_REFERENCE: &str = r"\{\{(.*?)\}\}";

/// Undeclared variable references, keyed by entity name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableWarning {
    pub commands: BTreeMap<String, Vec<String>>,
    pub components: BTreeMap<String, Vec<String>>,
    pub projects: BTreeMap<String, Vec<String>>,
    pub starter_projects: BTreeMap<String, Vec<String>>,
}

impl VariableWarning {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.components.is_empty()
            && self.projects.is_empty()
            && self.starter_projects.is_empty()
    }

    /// `(entity kind, references)` for every group.
    pub fn groups(&self) -> [(&'static str, &BTreeMap<String, Vec<String>>); 4] {
        [
            ("commands", &self.commands),
            ("components", &self.components),
            ("projects", &self.projects),
            ("starter projects", &self.starter_projects),
        ]
    }

    /// Emit one `warn!` line per offending entity.
    pub fn log(&self) {
        for (kind, entries) in self.groups() {
            for (name, keys) in entries {
                warn!(
                    "top-level variable warning: {} {} references invalid variables: {}",
                    kind,
                    name,
                    keys.join(",")
                );
            }
        }
    }
}

struct Substitution<'a> {
    pattern: &'a Regex,
    variables: &'a Variables,
    invalid: BTreeSet<String>,
}

impl<'a> Substitution<'a> {
    fn new(pattern: &'a Regex, variables: &'a Variables) -> Self {
        Self {
            pattern,
            variables,
            invalid: BTreeSet::new(),
        }
    }

    fn string(&mut self, value: &mut String) {
        if !value.contains("{{") {
            return;
        }
        let Substitution {
            pattern,
            variables,
            invalid,
        } = self;
        let replaced = pattern.replace_all(value.as_str(), |caps: &Captures| {
            match variables.get(&caps[1]) {
                Some(v) => v.clone(),
                None => {
                    invalid.insert(caps[1].to_string());
                    caps[0].to_string()
                }
            }
        });
        *value = replaced.into_owned();
    }

    fn option(&mut self, value: &mut Option<String>) {
        if let Some(value) = value {
            self.string(value);
        }
    }

    fn strings(&mut self, values: &mut [String]) {
        for value in values {
            self.string(value);
        }
    }

    fn env(&mut self, env: &mut [EnvVar]) {
        for var in env {
            self.string(&mut var.value);
        }
    }

    fn source(&mut self, source: &mut Option<ProjectSource>) {
        match source {
            Some(ProjectSource::Git(git)) | Some(ProjectSource::Github(git)) => {
                for url in git.remotes.values_mut() {
                    self.string(url);
                }
                if let Some(checkout) = &mut git.checkout_from {
                    self.option(&mut checkout.remote);
                    self.option(&mut checkout.revision);
                }
            }
            Some(ProjectSource::Zip(zip)) => self.string(&mut zip.location),
            Some(ProjectSource::Custom(_)) | None => {}
        }
    }

    /// Hand back the invalid keys seen since the last call.
    fn take_invalid(&mut self) -> Option<Vec<String>> {
        let keys: Vec<String> = std::mem::take(&mut self.invalid).into_iter().collect();
        (!keys.is_empty()).then_some(keys)
    }
}

/// Replace `{{name}}` references with top-level variable values.
///
/// Documents whose schema has no top-level variables are left untouched.
pub fn validate_and_replace(doc: &mut DevfileV2) -> Result<VariableWarning> {
    let mut warning = VariableWarning::default();
    let variables = match doc.get_top_level_variables() {
        Ok(variables) => variables.clone(),
        Err(e) => {
            debug!("skipping variable substitution: {}", e);
            return Ok(warning);
        }
    };
    let pattern = Regex::new(VARIABLE_REFERENCE)?;
    let mut sub = Substitution::new(&pattern, &variables);
    let content = doc.content_mut();

    for command in &mut content.commands {
        match &mut command.kind {
            CommandKind::Exec(exec) => {
                sub.option(&mut exec.label);
                sub.string(&mut exec.command_line);
                sub.string(&mut exec.component);
                sub.option(&mut exec.working_dir);
                sub.env(&mut exec.env);
            }
            CommandKind::Composite(composite) => sub.option(&mut composite.label),
            CommandKind::Apply(apply) => {
                sub.option(&mut apply.label);
                sub.string(&mut apply.component);
            }
            CommandKind::Custom(custom) => sub.option(&mut custom.label),
        }
        if let Some(keys) = sub.take_invalid() {
            warning.commands.insert(command.id.clone(), keys);
        }
    }

    for component in &mut content.components {
        match &mut component.kind {
            ComponentKind::Container(container) => {
                sub.string(&mut container.image);
                sub.option(&mut container.memory_limit);
                sub.option(&mut container.memory_request);
                sub.option(&mut container.cpu_limit);
                sub.option(&mut container.cpu_request);
                sub.strings(&mut container.command);
                sub.strings(&mut container.args);
                sub.env(&mut container.env);
                sub.option(&mut container.source_mapping);
                for mount in &mut container.volume_mounts {
                    sub.string(&mut mount.path);
                }
                for endpoint in &mut container.endpoints {
                    sub.option(&mut endpoint.path);
                }
            }
            ComponentKind::Volume(volume) => sub.option(&mut volume.size),
            ComponentKind::Kubernetes(k) | ComponentKind::Openshift(k) => {
                sub.option(&mut k.uri);
                sub.option(&mut k.inlined);
            }
            ComponentKind::Plugin(plugin) => {
                sub.option(&mut plugin.id);
                sub.option(&mut plugin.uri);
                sub.option(&mut plugin.registry_url);
            }
            ComponentKind::Custom(_) => {}
        }
        if let Some(keys) = sub.take_invalid() {
            warning.components.insert(component.name.clone(), keys);
        }
    }

    for project in &mut content.projects {
        sub.option(&mut project.clone_path);
        sub.source(&mut project.source);
        if let Some(keys) = sub.take_invalid() {
            warning.projects.insert(project.name.clone(), keys);
        }
    }

    for project in &mut content.starter_projects {
        sub.option(&mut project.description);
        sub.option(&mut project.sub_dir);
        sub.source(&mut project.source);
        if let Some(keys) = sub.take_invalid() {
            warning.starter_projects.insert(project.name.clone(), keys);
        }
    }

    if !warning.is_empty() {
        warning.log();
    }
    Ok(warning)
}

//! Project and starter project definitions

use super::Attributes;
use crate::error::{Error, Result};
use crate::variant::ProjectSourceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A project cloned into the workspace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub name: String,
    pub attributes: Attributes,
    pub clone_path: Option<String>,
    /// `None` when the document did not populate any source member.
    pub source: Option<ProjectSource>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: ProjectSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_clone_path(mut self, path: impl Into<String>) -> Self {
        self.clone_path = Some(path.into());
        self
    }
}

/// A project template offered when creating a new workspace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarterProject {
    pub name: String,
    pub attributes: Attributes,
    pub description: Option<String>,
    pub sub_dir: Option<String>,
    pub source: Option<ProjectSource>,
}

impl StarterProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: ProjectSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where a project's content comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectSource {
    Git(GitLikeProjectSource),
    Github(GitLikeProjectSource),
    Zip(ZipProjectSource),
    Custom(CustomProjectSource),
}

impl ProjectSource {
    pub fn source_type(&self) -> ProjectSourceType {
        match self {
            ProjectSource::Git(_) => ProjectSourceType::Git,
            ProjectSource::Github(_) => ProjectSourceType::Github,
            ProjectSource::Zip(_) => ProjectSourceType::Zip,
            ProjectSource::Custom(_) => ProjectSourceType::Custom,
        }
    }

    /// The git-like part of a Git or Github source.
    pub fn git_like(&self) -> Option<&GitLikeProjectSource> {
        match self {
            ProjectSource::Git(git) | ProjectSource::Github(git) => Some(git),
            _ => None,
        }
    }
}

/// Git-style source with named remotes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitLikeProjectSource {
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_from: Option<CheckoutFrom>,
}

/// Selects the remote and revision to check out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// The remote a git-like source resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSource {
    pub remote_name: String,
    pub remote_url: String,
    /// Empty when no revision was selected.
    pub revision: String,
}

impl GitLikeProjectSource {
    pub fn new<I, K, V>(remotes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            remotes: remotes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            checkout_from: None,
        }
    }

    pub fn with_checkout_from(mut self, remote: Option<&str>, revision: Option<&str>) -> Self {
        self.checkout_from = Some(CheckoutFrom {
            remote: remote.map(str::to_string),
            revision: revision.map(str::to_string),
        });
        self
    }

    /// Resolves the remote name, URL and revision to check out.
    ///
    /// A remote named in `checkoutFrom` always wins and must exist. Without
    /// one, the source must have exactly one remote.
    pub fn default_source(&self) -> Result<DefaultSource> {
        let checkout = self.checkout_from.as_ref();
        let revision = checkout
            .and_then(|c| c.revision.clone())
            .unwrap_or_default();
        let selected = checkout
            .and_then(|c| c.remote.as_deref())
            .filter(|remote| !remote.is_empty());

        let (remote_name, remote_url) = match selected {
            Some(remote) => {
                let url = self
                    .remotes
                    .get(remote)
                    .ok_or_else(|| Error::RemoteNotFound {
                        remote: remote.to_string(),
                    })?;
                (remote.to_string(), url.clone())
            }
            None => {
                let mut remotes = self.remotes.iter();
                match (remotes.next(), remotes.next()) {
                    (Some((name, url)), None) => (name.clone(), url.clone()),
                    (Some(_), Some(_)) => return Err(Error::AmbiguousRemote),
                    (None, _) => return Err(Error::NoRemotes),
                }
            }
        };

        Ok(DefaultSource {
            remote_name,
            remote_url,
            revision,
        })
    }
}

/// Zip archive source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipProjectSource {
    #[serde(default)]
    pub location: String,
}

/// Tool-specific source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProjectSource {
    #[serde(default)]
    pub project_source_class: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub embedded_resource: serde_json::Value,
}
